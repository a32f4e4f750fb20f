//! View models for the server-rendered pages.
//!
//! Pure functions that turn session state into the values the templates
//! display. The binary supplies the rank lookup and does the rendering.

mod notice;
mod view;

pub use notice::Notice;
pub use view::{
    Page, PageView, DEFAULT_USER_IMAGE, HONORIFIC_SUFFIX, LOGIN_PLACEHOLDER,
};
