//! Credit deduction after the scheduling widget books a meeting.
//!
//! The deduction runs only after the widget reports success and there is no
//! balance pre-check. A failed deduction does not cancel the meeting; the member
//! is sent back to the professor list instead.

use url::Url;

use crate::gateway::LibraryGateway;
use crate::models::{MemberId, Professor, SessionMember};
use crate::notice::{Notice, NoticeLevel};
use crate::result::GatewayError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreditSettlement {
    pub notice: Notice,
    /// Path to navigate to, set when the deduction failed.
    pub redirect: Option<String>,
}

/// Settles meeting costs for one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulingCredits {
    member_id: MemberId,
    professors_path: String,
}

impl SchedulingCredits {
    pub fn new(member_id: MemberId, professors_path: impl Into<String>) -> Self {
        Self {
            member_id,
            professors_path: professors_path.into(),
        }
    }

    pub fn settle(&self, outcome: Result<(), GatewayError>) -> CreditSettlement {
        match outcome {
            Ok(()) => CreditSettlement {
                notice: Notice::new(
                    NoticeLevel::Success,
                    "Meeting Scheduled",
                    "Your meeting has been scheduled successfully.",
                ),
                redirect: None,
            },
            Err(e) => {
                tracing::error!("Error updating credits for member {}: {}", self.member_id, e);
                CreditSettlement {
                    notice: Notice::error(
                        "There was an error scheduling your meeting. Please try again.",
                    ),
                    redirect: Some(self.professors_path.clone()),
                }
            }
        }
    }

    /// Called when the widget reports a scheduled meeting with `professor`.
    pub async fn on_event_scheduled<G: LibraryGateway>(
        &self,
        gateway: &G,
        professor: &Professor,
    ) -> CreditSettlement {
        let outcome = gateway
            .update_member_credits(self.member_id, -professor.credits)
            .await;
        self.settle(outcome)
    }
}

/// Booking page URL for the inline widget embedded on `embed_domain`, with the
/// member's name and email prefilled when someone is signed in.
pub fn widget_url(
    link: &str,
    embed_domain: &str,
    member: Option<&SessionMember>,
) -> Result<String, url::ParseError> {
    let mut url = Url::parse(link)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("embed_domain", embed_domain)
            .append_pair("embed_type", "Inline");
        if let Some(member) = member {
            query
                .append_pair("name", &member.display_name())
                .append_pair("email", &member.email);
        }
    }
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{GatewayCall, MemoryGateway};
    use crate::models::fixtures::profile;

    fn professor(credits: i32) -> Professor {
        Professor {
            id: 3,
            name: "Dr. Hopper".to_string(),
            department: "Computer Science".to_string(),
            bio: String::new(),
            calendly_link: Some("https://calendly.com/hopper".to_string()),
            credits,
        }
    }

    fn member() -> SessionMember {
        SessionMember {
            id: 1,
            email: "ada+lib@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: "member".to_string(),
        }
    }

    #[test]
    fn test_widget_url_embeds_inline_with_prefill() {
        let url = widget_url("https://calendly.com/hopper", "library.example.org", Some(&member())).unwrap();
        assert_eq!(
            url,
            "https://calendly.com/hopper?embed_domain=library.example.org&embed_type=Inline\
             &name=Ada+Lovelace&email=ada%2Blib%40example.com"
        );
    }

    #[test]
    fn test_widget_url_keeps_existing_query() {
        let url = widget_url("https://calendly.com/hopper/30min?month=2026-10", "localhost:8080", None).unwrap();
        assert_eq!(
            url,
            "https://calendly.com/hopper/30min?month=2026-10&embed_domain=localhost%3A8080&embed_type=Inline"
        );
    }

    #[test]
    fn test_widget_url_rejects_relative_link() {
        assert!(widget_url("calendly.com/hopper", "localhost", None).is_err());
    }

    #[tokio::test]
    async fn test_deducts_meeting_cost() {
        let gateway = MemoryGateway::new().with_profile(profile(), "pw");
        let credits = SchedulingCredits::new(1, "/dashboard/professors");

        let settlement = credits.on_event_scheduled(&gateway, &professor(4)).await;

        assert_eq!(settlement.notice.title, "Meeting Scheduled");
        assert!(settlement.redirect.is_none());
        assert_eq!(gateway.credits(1), Some(6));
        assert_eq!(gateway.calls(), vec![GatewayCall::UpdateMemberCredits(1, -4)]);
    }

    #[tokio::test]
    async fn test_no_balance_precheck() {
        let gateway = MemoryGateway::new().with_profile(profile(), "pw");
        let credits = SchedulingCredits::new(1, "/dashboard/professors");

        credits.on_event_scheduled(&gateway, &professor(25)).await;

        assert_eq!(gateway.credits(1), Some(-15));
    }

    #[tokio::test]
    async fn test_failure_redirects_to_professors() {
        let gateway = MemoryGateway::new();
        let credits = SchedulingCredits::new(99, "/dashboard/professors");

        let settlement = credits.on_event_scheduled(&gateway, &professor(2)).await;

        assert!(settlement.notice.is_error());
        assert_eq!(settlement.redirect.as_deref(), Some("/dashboard/professors"));
    }
}
