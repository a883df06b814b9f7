//! HTML 페이지 빌더
//!
//! 서버 사이드 렌더링되는 다섯 페이지의 마크업을 구성합니다.
//! 페이지 수가 적고 동적 요소가 시크릿 목록뿐이므로
//! 템플릿 엔진 없이 문자열 조립으로 충분합니다.
//!
//! 사용자 입력(시크릿 텍스트)은 렌더링 전에 반드시
//! [`escape_html`]을 거칩니다.

/// HTML 특수 문자를 이스케이프합니다
///
/// 사용자가 제출한 텍스트를 마크업에 삽입하기 전에 호출합니다.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 공통 레이아웃으로 본문을 감쌉니다
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} - Secrets</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40rem; margin: 4rem auto; padding: 0 1rem; }}
    .secret {{ font-style: italic; margin: 0.5rem 0; }}
    .providers a {{ display: block; margin: 0.25rem 0; }}
    form label {{ display: block; margin-top: 0.75rem; }}
  </style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// 랜딩 페이지
pub fn home_page() -> String {
    page(
        "Home",
        r#"<h1>Secrets</h1>
<p>당신만 알고 있는 비밀을 익명으로 나눠보세요.</p>
<p>
  <a href="/register">회원가입</a> ·
  <a href="/login">로그인</a>
</p>"#,
    )
}

/// 로그인 페이지
pub fn login_page() -> String {
    page(
        "Login",
        r#"<h1>로그인</h1>
<form action="/login" method="post">
  <label>사용자명 <input type="text" name="username" autocomplete="username"></label>
  <label>비밀번호 <input type="password" name="password" autocomplete="current-password"></label>
  <button type="submit">로그인</button>
</form>
<div class="providers">
  <h2>소셜 로그인</h2>
  <a href="/auth/google">Google로 로그인</a>
  <a href="/auth/facebook">Facebook으로 로그인</a>
  <a href="/auth/twitter">Twitter로 로그인</a>
</div>
<p><a href="/register">아직 계정이 없으신가요?</a></p>"#,
    )
}

/// 회원가입 페이지
pub fn register_page() -> String {
    page(
        "Register",
        r#"<h1>회원가입</h1>
<form action="/register" method="post">
  <label>사용자명 <input type="text" name="username" autocomplete="username"></label>
  <label>비밀번호 <input type="password" name="password" autocomplete="new-password"></label>
  <button type="submit">가입</button>
</form>
<div class="providers">
  <h2>소셜 계정으로 시작</h2>
  <a href="/auth/google">Google로 시작</a>
  <a href="/auth/facebook">Facebook으로 시작</a>
  <a href="/auth/twitter">Twitter로 시작</a>
</div>
<p><a href="/login">이미 계정이 있으신가요?</a></p>"#,
    )
}

/// 시크릿 페이지
///
/// 모든 사용자가 제출한 시크릿을 제출자 정보 없이 나열합니다.
pub fn secrets_page(secrets: &[String]) -> String {
    let listing = if secrets.is_empty() {
        "<p>아직 제출된 시크릿이 없습니다. 첫 번째가 되어보세요.</p>".to_string()
    } else {
        secrets
            .iter()
            .map(|secret| format!("<p class=\"secret\">{}</p>", escape_html(secret)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"<h1>여기서만 공유되는 비밀들</h1>
{listing}
<p>
  <a href="/submit">비밀 제출하기</a> ·
  <a href="/logout">로그아웃</a>
</p>"#
    );

    page("Secrets", &body)
}

/// 시크릿 제출 페이지
pub fn submit_page() -> String {
    page(
        "Submit",
        r#"<h1>비밀을 들려주세요</h1>
<form action="/submit" method="post">
  <label>비밀 <input type="text" name="secret" placeholder="아무도 모르는 이야기"></label>
  <button type="submit">제출</button>
</form>
<p><a href="/secrets">돌아가기</a></p>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("평범한 텍스트"), "평범한 텍스트");
    }

    #[test]
    fn test_login_page_has_credential_fields_and_providers() {
        let html = login_page();
        assert!(html.contains(r#"name="username""#));
        assert!(html.contains(r#"name="password""#));
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"href="/auth/google""#));
        assert!(html.contains(r#"href="/auth/facebook""#));
        assert!(html.contains(r#"href="/auth/twitter""#));
    }

    #[test]
    fn test_secrets_page_escapes_user_content() {
        let secrets = vec!["<b>bold</b> 비밀".to_string()];
        let html = secrets_page(&secrets);

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; 비밀"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_secrets_page_lists_every_secret() {
        let secrets = vec!["첫 번째".to_string(), "두 번째".to_string()];
        let html = secrets_page(&secrets);

        assert!(html.contains("첫 번째"));
        assert!(html.contains("두 번째"));
    }

    #[test]
    fn test_secrets_page_empty_state() {
        let html = secrets_page(&[]);
        assert!(html.contains("아직 제출된 시크릿이 없습니다"));
    }

    #[test]
    fn test_submit_page_has_secret_field() {
        let html = submit_page();
        assert!(html.contains(r#"name="secret""#));
        assert!(html.contains(r#"action="/submit""#));
    }
}
