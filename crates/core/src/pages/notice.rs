use serde::Serialize;

/// One-shot notice shown after a redirect, selected by the `msg` query flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Notice type (e.g., "success", "info")
    pub kind: &'static str,
    pub message: &'static str,
}

impl Notice {
    /// Flag set by logout.
    pub const LOGOUT_SUCCESS: &'static str = "logoutsuccess";
    /// Flag set by a completed unlink.
    pub const UNLINK_SUCCESS: &'static str = "inlinkSuccess";

    /// Notice for a `msg` flag, `None` for unknown flags.
    pub fn from_msg(msg: &str) -> Option<Self> {
        match msg {
            Self::LOGOUT_SUCCESS => Some(Self {
                kind: "info",
                message: "로그아웃 되었습니다.",
            }),
            Self::UNLINK_SUCCESS => Some(Self {
                kind: "success",
                message: "회원 탈퇴 처리가 완료되었습니다.",
            }),
            _ => None,
        }
    }
}
