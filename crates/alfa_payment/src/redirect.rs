//! Redirect form assembly, rendering and the delivery seam.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::errors::{CustomResult, NavigationError};

const DEFAULT_STATUS_MESSAGE: &str = "Please wait while we process your payment...";

/// HTTP method of the redirect form submission.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

/// The one-shot form POSTed to the gateway's hosted payment page.
///
/// `form_fields` keeps the exact order of the signed sequence; the gateway
/// recomputes the hash from the posted values, so the payload must carry
/// precisely what was signed.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RedirectionForm {
    /// URL of the hosted payment page.
    pub endpoint: String,
    /// Submission method; the gateway expects POST.
    pub method: Method,
    /// Ordered name/value pairs physically submitted.
    pub form_fields: Vec<(String, String)>,
    /// Wait text shown on the interstitial page; `None` renders the default.
    pub status_message: Option<String>,
}

impl RedirectionForm {
    /// Renders the interstitial page that carries the browser to the
    /// gateway: an invisible form with one hidden input per field and a
    /// script submitting it after a short delay.
    ///
    /// Markup is built structurally, so field values and the endpoint are
    /// escaped in attribute position and cannot break out of the document.
    pub fn render_html(&self) -> Markup {
        let message = self
            .status_message
            .as_deref()
            .unwrap_or(DEFAULT_STATUS_MESSAGE);
        html! {
            (DOCTYPE)
            html {
                head {
                    meta name="viewport" content="width=device-width, initial-scale=1";
                }
                body style="background-color: #ffffff; padding: 20px; font-family: Arial, Helvetica, Sans-Serif;" {
                    h3 style="text-align: center;" { (message) }
                    form action=(self.endpoint) method=(self.method.to_string()) hidden #payment_form {
                        @for (field, value) in &self.form_fields {
                            input type="hidden" name=(field) value=(value);
                        }
                    }
                    (PreEscaped(r#"<script type="text/javascript"> var frm = document.getElementById("payment_form"); window.setTimeout(function () { frm.submit(); }, 300); </script>"#))
                }
            }
        }
    }
}

/// Delivery seam for the finished redirect form.
///
/// The pipeline never touches a UI toolkit; embedders decide how the form
/// reaches the browser, typically by responding with
/// [`RedirectionForm::render_html`]. Tests substitute a recording fake.
pub trait Navigator: Sync {
    /// Hands the final form off for browser delivery.
    ///
    /// Called at most once per submission attempt, and only after a
    /// successful handshake.
    fn submit(&self, form: &RedirectionForm) -> CustomResult<(), NavigationError>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn test_form() -> RedirectionForm {
        RedirectionForm {
            endpoint: "https://sandbox.bankalfalah.com/SSO/SSO/SSO".to_string(),
            method: Method::Post,
            form_fields: vec![
                ("AuthToken".to_string(), "T".to_string()),
                ("RequestHash".to_string(), "abc123".to_string()),
                ("MerchantId".to_string(), "1".to_string()),
            ],
            status_message: None,
        }
    }

    #[test]
    fn method_renders_uppercase() {
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Get.to_string(), "GET");
    }

    #[test]
    fn rendered_page_carries_every_field_as_hidden_input() {
        let rendered = test_form().render_html().into_string();
        assert!(rendered.contains(r#"action="https://sandbox.bankalfalah.com/SSO/SSO/SSO""#));
        assert!(rendered.contains(r#"method="POST""#));
        assert!(rendered.contains(r#"<input type="hidden" name="AuthToken" value="T">"#));
        assert!(rendered.contains(r#"<input type="hidden" name="RequestHash" value="abc123">"#));
        assert!(rendered.contains(r#"<input type="hidden" name="MerchantId" value="1">"#));
    }

    #[test]
    fn rendered_fields_keep_their_order() {
        let rendered = test_form().render_html().into_string();
        let token_at = rendered
            .find(r#"name="AuthToken""#)
            .expect("AuthToken input should render");
        let hash_at = rendered
            .find(r#"name="RequestHash""#)
            .expect("RequestHash input should render");
        let merchant_at = rendered
            .find(r#"name="MerchantId""#)
            .expect("MerchantId input should render");
        assert!(token_at < hash_at);
        assert!(hash_at < merchant_at);
    }

    #[test]
    fn rendered_page_escapes_hostile_values() {
        let mut form = test_form();
        form.form_fields.push((
            "ReturnURL".to_string(),
            r#""><script>alert(1)</script>"#.to_string(),
        ));
        let rendered = form.render_html().into_string();
        assert!(!rendered.contains("<script>alert"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn status_message_override_is_rendered() {
        let mut form = test_form();
        form.status_message = Some("Redirecting to your bank".to_string());
        let rendered = form.render_html().into_string();
        assert!(rendered.contains("Redirecting to your bank"));
        assert!(!rendered.contains(DEFAULT_STATUS_MESSAGE));

        let with_default = test_form().render_html().into_string();
        assert!(with_default.contains(DEFAULT_STATUS_MESSAGE));
    }
}
