//! HTML templates for the mock Kakao consent page.

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate the mock login page shown at `/oauth/authorize`.
///
/// The form posts the chosen identity back to the mock IdP, which then
/// redirects to `redirect_uri` with a mock authorization code.
pub fn login_page(client_id: &str, redirect_uri: &str, scope: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <title>Mock Kakao Login (DEV ONLY)</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, sans-serif;
            max-width: 400px;
            margin: 100px auto;
            padding: 20px;
        }}
        .warning {{
            background: #fff3cd;
            border: 1px solid #ffc107;
            padding: 15px;
            border-radius: 8px;
            margin-bottom: 20px;
        }}
        form {{
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
        }}
        label {{
            display: block;
            margin-bottom: 5px;
            font-weight: 500;
        }}
        input[type="text"], input[type="url"] {{
            width: 100%;
            padding: 10px;
            margin-bottom: 15px;
            border: 1px solid #ced4da;
            border-radius: 4px;
            box-sizing: border-box;
        }}
        button {{
            width: 100%;
            padding: 12px;
            background: #fee500;
            color: #191919;
            border: none;
            border-radius: 6px;
            cursor: pointer;
            font-size: 16px;
        }}
    </style>
</head>
<body>
    <div class="warning">
        <p>This is a <strong>mock Kakao login</strong> for development purposes.</p>
        <p>Client <code>{client_id}</code> requests <code>{scope}</code>.</p>
    </div>

    <form action="/oauth/authorize/submit" method="POST">
        <input type="hidden" name="redirect_uri" value="{redirect_uri}" />

        <label for="id">Kakao user id</label>
        <input type="text" id="id" name="id" placeholder="1234567890" required />

        <label for="nickname">Nickname</label>
        <input type="text" id="nickname" name="nickname" placeholder="카카오" required />

        <label for="thumbnail_image">Thumbnail URL (optional)</label>
        <input type="url" id="thumbnail_image" name="thumbnail_image" />

        <button type="submit">카카오 로그인</button>
    </form>
</body>
</html>"#,
        client_id = html_escape(client_id),
        redirect_uri = html_escape(redirect_uri),
        scope = html_escape(scope),
    )
}
