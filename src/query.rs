//! Pure derivations over the cached lead and message lists. Everything here
//! is a filter or join over backend-ordered data; nothing re-sorts.

use crate::api::models::{Lead, Message};

/// Leads matching a search term: case-insensitive substring on the name, or
/// raw substring on the phone. An empty term matches everything.
pub fn filtered_leads<'a>(leads: &'a [Lead], term: &str) -> Vec<&'a Lead> {
    let needle = term.to_lowercase();
    leads
        .iter()
        .filter(|lead| lead.name.to_lowercase().contains(&needle) || lead.phone.contains(term))
        .collect()
}

/// Leads whose follow-up falls on the given UTC calendar date (`YYYY-MM-DD`).
/// The backend sends ISO 8601 strings, so a prefix match on the date portion
/// is enough.
pub fn due_today<'a>(leads: &'a [Lead], today: &str) -> Vec<&'a Lead> {
    leads
        .iter()
        .filter(|lead| {
            lead.follow_up_date
                .as_deref()
                .is_some_and(|date| date.starts_with(today))
        })
        .collect()
}

/// Today's UTC calendar date, formatted for [`due_today`].
pub fn utc_today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Messages sent to the given phone number, join by exact string equality.
/// Reformatted or duplicate numbers break the association; see DESIGN.md.
pub fn messages_for_lead<'a>(messages: &'a [Message], phone: &str) -> Vec<&'a Message> {
    messages.iter().filter(|msg| msg.phone == phone).collect()
}

/// The one message template the dashboard sends. Not customizable.
pub fn follow_up_text(name: &str) -> String {
    format!("Hi {name}, just following up! Let us know if you have any questions.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(id: i64, name: &str, phone: &str, follow_up: Option<&str>) -> Lead {
        Lead {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            source: "web".to_string(),
            notes: String::new(),
            follow_up_date: follow_up.map(str::to_string),
        }
    }

    fn message(id: i64, phone: &str, text: &str) -> Message {
        Message {
            id,
            phone: phone.to_string(),
            message: text.to_string(),
            sent_at: "2024-01-01T10:00:00Z".to_string(),
        }
    }

    fn sample_leads() -> Vec<Lead> {
        vec![
            lead(1, "Ann", "555-1", Some("2024-01-01")),
            lead(2, "Bob", "555-2", Some("2024-06-15T09:30:00Z")),
        ]
    }

    #[test]
    fn empty_term_returns_all_leads_in_order() {
        let leads = sample_leads();
        let out = filtered_leads(&leads, "");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 1);
        assert_eq!(out[1].id, 2);
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let leads = sample_leads();
        let out = filtered_leads(&leads, "ann");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Ann");
        let out = filtered_leads(&leads, "ANN");
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn search_matches_phone_substring() {
        let leads = sample_leads();
        let out = filtered_leads(&leads, "55");
        assert_eq!(out.len(), 2);
        let out = filtered_leads(&leads, "555-2");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Bob");
    }

    #[test]
    fn search_results_are_a_subset_matching_the_predicate() {
        let leads = sample_leads();
        for term in ["a", "5", "bob", "zzz"] {
            for found in filtered_leads(&leads, term) {
                assert!(
                    found.name.to_lowercase().contains(&term.to_lowercase())
                        || found.phone.contains(term)
                );
                assert!(leads.iter().any(|l| l.id == found.id));
            }
        }
    }

    #[test]
    fn due_today_matches_date_prefix_only() {
        let leads = vec![
            lead(1, "Ann", "555-1", Some("2024-01-01")),
            lead(2, "Bob", "555-2", Some("2024-06-15T09:30:00Z")),
            lead(3, "Cid", "555-3", None),
        ];
        let due = due_today(&leads, "2024-06-15");
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].name, "Bob");
        assert!(due_today(&leads, "2024-02-02").is_empty());
    }

    #[test]
    fn leads_without_follow_up_are_never_due() {
        let leads = vec![lead(1, "Ann", "555-1", None)];
        assert!(due_today(&leads, "2024-01-01").is_empty());
    }

    #[test]
    fn utc_today_is_a_calendar_date() {
        let today = utc_today();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
        assert_eq!(&today[7..8], "-");
    }

    #[test]
    fn messages_join_by_exact_phone_equality_in_order() {
        let messages = vec![
            message(1, "555-1", "first"),
            message(2, "555-2", "other"),
            message(3, "555-1", "second"),
            message(4, "5551", "reformatted, does not join"),
        ];
        let for_ann = messages_for_lead(&messages, "555-1");
        assert_eq!(for_ann.len(), 2);
        assert_eq!(for_ann[0].message, "first");
        assert_eq!(for_ann[1].message, "second");
        assert!(messages_for_lead(&messages, "555-9").is_empty());
    }

    #[test]
    fn follow_up_text_uses_fixed_template() {
        assert_eq!(
            follow_up_text("Ann"),
            "Hi Ann, just following up! Let us know if you have any questions."
        );
    }
}
