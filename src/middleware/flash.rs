use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use std::convert::Infallible;
use time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Danger,
    Success,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Danger => "danger",
            FlashKind::Success => "success",
        }
    }

    fn cookie_name(self) -> &'static str {
        match self {
            FlashKind::Danger => "flash_danger",
            FlashKind::Success => "flash_success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

/// Pending flash messages, kept in one encrypted cookie per kind until the
/// next page that reads them.
///
/// Use as an extractor and hand it back in the response so the cookie
/// changes reach the browser.
pub struct Flash {
    jar: PrivateCookieJar,
}

impl Flash {
    pub fn new(jar: PrivateCookieJar) -> Self {
        Self { jar }
    }

    /// Queue `text` behind any messages of the same kind already pending.
    pub fn push(self, kind: FlashKind, text: impl Into<String>) -> Self {
        let mut pending = self.pending(kind);
        pending.push(text.into());
        let value = serde_json::to_string(&pending).unwrap_or_else(|_| "[]".to_string());
        Self {
            jar: self.jar.add(build_cookie(kind.cookie_name(), value)),
        }
    }

    /// Remove and return every pending message of `kind`.
    pub fn take(self, kind: FlashKind) -> (Self, Vec<FlashMessage>) {
        let messages: Vec<FlashMessage> = self
            .pending(kind)
            .into_iter()
            .map(|text| FlashMessage { kind, text })
            .collect();

        let jar = if self.jar.get(kind.cookie_name()).is_some() {
            self.jar.remove(clear_cookie(kind.cookie_name()))
        } else {
            self.jar
        };
        (Self { jar }, messages)
    }

    fn pending(&self, kind: FlashKind) -> Vec<String> {
        self.jar
            .get(kind.cookie_name())
            .and_then(|c| serde_json::from_str(c.value()).ok())
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self::new(jar))
    }
}

impl IntoResponseParts for Flash {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

fn build_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .build()
}

fn clear_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(Cookie::new(name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_flash() -> Flash {
        Flash::new(PrivateCookieJar::new(Key::generate()))
    }

    #[test]
    fn take_returns_pushed_messages_in_order() {
        let flash = empty_flash()
            .push(FlashKind::Danger, "first")
            .push(FlashKind::Danger, "second")
            .push(FlashKind::Success, "saved");

        let (flash, danger) = flash.take(FlashKind::Danger);
        let texts: Vec<&str> = danger.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
        assert!(danger.iter().all(|m| m.kind == FlashKind::Danger));

        let (flash, success) = flash.take(FlashKind::Success);
        assert_eq!(success.len(), 1);
        assert_eq!(success[0].text, "saved");

        let (_, again) = flash.take(FlashKind::Danger);
        assert!(again.is_empty());
    }

    #[test]
    fn take_without_pending_is_empty() {
        let (_, messages) = empty_flash().take(FlashKind::Success);
        assert!(messages.is_empty());
    }

    #[test]
    fn multiline_text_survives() {
        let text = "You must enter a name.\nYou must enter a hobby.";
        let (_, messages) = empty_flash().push(FlashKind::Danger, text).take(FlashKind::Danger);
        assert_eq!(messages[0].text, text);
    }
}
