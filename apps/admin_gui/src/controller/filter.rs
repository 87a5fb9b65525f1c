//! Search and filter predicates for the user directory.

use shared::domain::{RegistrationStatus, UserRecord, UserType};

/// The combined filter/search configuration for the users screen. Filtering
/// is a pure function of (collection, criteria): the same inputs always
/// produce the same view, so it is safe to re-run on every keystroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub user_type: Option<UserType>,
    pub status: Option<RegistrationStatus>,
    pub only_active_auctions: bool,
}

impl FilterCriteria {
    /// AND of the four sub-predicates.
    pub fn matches(&self, user: &UserRecord) -> bool {
        self.matches_type(user)
            && self.matches_status(user)
            && self.matches_activity(user)
            && self.matches_search(user)
    }

    fn matches_type(&self, user: &UserRecord) -> bool {
        self.user_type
            .map(|wanted| user.user_type == wanted)
            .unwrap_or(true)
    }

    fn matches_status(&self, user: &UserRecord) -> bool {
        self.status
            .map(|wanted| user.registration_status == wanted)
            .unwrap_or(true)
    }

    fn matches_activity(&self, user: &UserRecord) -> bool {
        !self.only_active_auctions || user.activity_stats.active_auctions_count > 0
    }

    /// Case-insensitive substring match against any of name, email, phone,
    /// or the user id. An empty search matches everything.
    fn matches_search(&self, user: &UserRecord) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            user.name.as_str(),
            user.email.as_str(),
            user.phone.as_str(),
            user.user_id.0.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Order-preserving filtered view over the loaded collection.
pub fn filter_users<'a>(users: &'a [UserRecord], criteria: &FilterCriteria) -> Vec<&'a UserRecord> {
    users.iter().filter(|user| criteria.matches(user)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::domain::{ActivityStats, DocumentRefs, UserId};

    fn user(id: &str, name: &str, user_type: UserType, status: RegistrationStatus) -> UserRecord {
        UserRecord {
            user_id: UserId::from(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+91-98100-11111".to_string(),
            city: "Delhi".to_string(),
            user_type,
            registration_status: status,
            documents: DocumentRefs::default(),
            activity_stats: ActivityStats::default(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
        }
    }

    fn with_active_auctions(mut user: UserRecord, count: u32) -> UserRecord {
        user.activity_stats.active_auctions_count = count;
        user
    }

    fn fixture() -> Vec<UserRecord> {
        vec![
            user("USR-1", "Asha Verma", UserType::Buyer, RegistrationStatus::Pending),
            with_active_auctions(
                user("USR-2", "Bilal Khan", UserType::Seller, RegistrationStatus::Approved),
                2,
            ),
            user("USR-3", "Chitra Rao", UserType::Seller, RegistrationStatus::Rejected),
            user(
                "USR-4",
                "Dev Anand",
                UserType::Buyer,
                RegistrationStatus::UnderVerification,
            ),
        ]
    }

    #[test]
    fn empty_criteria_keeps_every_user_in_order() {
        let users = fixture();
        let filtered = filter_users(&users, &FilterCriteria::default());
        let ids: Vec<_> = filtered.iter().map(|u| u.user_id.0.as_str()).collect();
        assert_eq!(ids, ["USR-1", "USR-2", "USR-3", "USR-4"]);
    }

    #[test]
    fn type_filter_keeps_matching_tag_only() {
        let users = fixture();
        let criteria = FilterCriteria {
            user_type: Some(UserType::Seller),
            ..FilterCriteria::default()
        };
        let filtered = filter_users(&users, &criteria);
        assert!(filtered.iter().all(|u| u.user_type == UserType::Seller));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn status_filter_keeps_matching_status_only() {
        let users = fixture();
        let criteria = FilterCriteria {
            status: Some(RegistrationStatus::Approved),
            ..FilterCriteria::default()
        };
        let filtered = filter_users(&users, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].user_id, UserId::from("USR-2"));
    }

    #[test]
    fn active_auctions_toggle_drops_idle_users() {
        let users = fixture();
        let criteria = FilterCriteria {
            only_active_auctions: true,
            ..FilterCriteria::default()
        };
        let filtered = filter_users(&users, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].user_id, UserId::from("USR-2"));
    }

    #[test]
    fn search_matches_any_of_name_email_phone_or_id() {
        let users = fixture();
        let by_name = FilterCriteria {
            search: "chitra".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_users(&users, &by_name).len(), 1);

        let by_email = FilterCriteria {
            search: "BILAL.KHAN@EXAMPLE".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_users(&users, &by_email).len(), 1);

        let by_phone = FilterCriteria {
            search: "98100-11111".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_users(&users, &by_phone).len(), 4);

        let by_id = FilterCriteria {
            search: "usr-4".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_users(&users, &by_id).len(), 1);
    }

    #[test]
    fn predicates_compose_as_logical_and() {
        let users = fixture();
        let criteria = FilterCriteria {
            search: "khan".to_string(),
            user_type: Some(UserType::Seller),
            status: Some(RegistrationStatus::Approved),
            only_active_auctions: true,
        };
        assert_eq!(filter_users(&users, &criteria).len(), 1);

        let contradiction = FilterCriteria {
            status: Some(RegistrationStatus::Rejected),
            ..criteria
        };
        assert!(filter_users(&users, &contradiction).is_empty());
    }

    #[test]
    fn filtering_is_referentially_pure() {
        let users = fixture();
        let criteria = FilterCriteria {
            search: "a".to_string(),
            ..FilterCriteria::default()
        };
        let first: Vec<_> = filter_users(&users, &criteria)
            .iter()
            .map(|u| u.user_id.clone())
            .collect();
        let second: Vec<_> = filter_users(&users, &criteria)
            .iter()
            .map(|u| u.user_id.clone())
            .collect();
        assert_eq!(first, second);
    }
}
