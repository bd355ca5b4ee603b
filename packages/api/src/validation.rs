//! Input rules shared by the server functions.
//!
//! Kept free of server-only dependencies so they are unit tested on every build.

use store::{MemberId, ProfileUpdate};

/// Minimum length of a new password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Trim the submitted profile fields and require a first name.
pub fn clean_profile_update(update: ProfileUpdate) -> Result<ProfileUpdate, String> {
    let cleaned = ProfileUpdate {
        first_name: update.first_name.trim().to_string(),
        last_name: update.last_name.trim().to_string(),
        phone_number: update.phone_number.trim().to_string(),
    };
    if cleaned.first_name.is_empty() {
        return Err("First name is required".to_string());
    }
    if !cleaned
        .phone_number
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err("Phone number may only contain digits, spaces and + - ( )".to_string());
    }
    Ok(cleaned)
}

pub fn check_new_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

/// Emails are matched case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `ILIKE` pattern matching `search` anywhere, with `%`, `_` and `\` taken literally.
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    let search = search?.trim();
    if search.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// Members may only spend their own credits. Granting credits, or touching
/// another member's balance, is reserved to admins.
pub fn may_adjust_credits(caller: MemberId, target: MemberId, delta: i32, caller_is_admin: bool) -> bool {
    caller_is_admin || (caller == target && delta <= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(first: &str, phone: &str) -> ProfileUpdate {
        ProfileUpdate {
            first_name: first.to_string(),
            last_name: " Hopper ".to_string(),
            phone_number: phone.to_string(),
        }
    }

    #[test]
    fn test_profile_update_is_trimmed() {
        let cleaned = clean_profile_update(update(" Grace ", " +1 (555) 010-0100 ")).unwrap();
        assert_eq!(cleaned.first_name, "Grace");
        assert_eq!(cleaned.last_name, "Hopper");
        assert_eq!(cleaned.phone_number, "+1 (555) 010-0100");
    }

    #[test]
    fn test_profile_update_rejects_blank_first_name() {
        assert_eq!(
            clean_profile_update(update("   ", "")).unwrap_err(),
            "First name is required"
        );
    }

    #[test]
    fn test_profile_update_rejects_letters_in_phone() {
        assert!(clean_profile_update(update("Grace", "call me")).is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(check_new_password("short").is_err());
        assert!(check_new_password("long enough").is_ok());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern(Some("rome")).as_deref(), Some("%rome%"));
        assert_eq!(search_pattern(Some(" 100% ")).as_deref(), Some("%100\\%%"));
        assert_eq!(search_pattern(Some("a_b\\c")).as_deref(), Some("%a\\_b\\\\c%"));
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(search_pattern(None), None);
    }

    #[test]
    fn test_members_cannot_grant_themselves_credits() {
        assert!(may_adjust_credits(1, 1, -4, false));
        assert!(may_adjust_credits(1, 1, 0, false));
        assert!(!may_adjust_credits(1, 1, 500, false));
        assert!(!may_adjust_credits(1, 2, -4, false));
    }

    #[test]
    fn test_admins_may_adjust_any_balance() {
        assert!(may_adjust_credits(1, 1, 500, true));
        assert!(may_adjust_credits(1, 2, 10, true));
        assert!(may_adjust_credits(1, 2, -10, true));
    }
}
