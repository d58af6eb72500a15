//! Derived user-list views: filtering, ordering and pagination
//!
//! These are pure functions over the held snapshot. The server order is
//! oldest-first; the view shows newest-first.

use quotapanel_core::ClientRecord;

/// Current search and pagination inputs
#[derive(Debug, Clone)]
pub struct UserQuery {
    /// Case-insensitive substring matched against username and UUID
    pub search: String,

    /// Requested page, 1-based
    pub page: usize,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
        }
    }
}

/// One page of the filtered, newest-first user list
#[derive(Debug, Clone)]
pub struct UserPage {
    /// Records on this page
    pub users: Vec<ClientRecord>,

    /// Page actually shown after clamping, 1-based
    pub page: usize,

    /// Total number of pages, at least 1
    pub page_count: usize,

    /// Number of records matching the filter
    pub filtered: usize,

    /// Number of records before filtering
    pub total: usize,
}

/// Whether a record matches the search text.
///
/// An empty search matches everything; otherwise the username and the UUID
/// are checked case-insensitively.
#[must_use]
pub fn matches_query(user: &ClientRecord, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    user.username.to_lowercase().contains(&needle)
        || user
            .uuid
            .as_deref()
            .is_some_and(|uuid| uuid.to_lowercase().contains(&needle))
}

/// Total pages for a filtered count, never less than 1
#[must_use]
pub fn page_count(filtered: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    filtered.div_ceil(page_size).max(1)
}

/// Apply filter, newest-first ordering and pagination to the user list.
///
/// The requested page is clamped into `[1, page_count]`.
#[must_use]
pub fn select_page(users: &[ClientRecord], query: &UserQuery, page_size: usize) -> UserPage {
    let total = users.len();

    let mut filtered: Vec<&ClientRecord> = users
        .iter()
        .filter(|user| matches_query(user, &query.search))
        .collect();
    filtered.reverse();

    let filtered_count = filtered.len();
    let pages = page_count(filtered_count, page_size);
    let page = query.page.clamp(1, pages);

    let users = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    UserPage {
        users,
        page,
        page_count: pages,
        filtered: filtered_count,
        total,
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn user(name: &str, uuid: Option<&str>) -> ClientRecord {
        ClientRecord {
            id: None,
            uuid: uuid.map(str::to_string),
            username: name.to_string(),
            used_data: 0,
            data_limit: 0,
            expiry_date_unix: None,
            status: true,
            is_online: false,
            sub_id: None,
            flow: None,
        }
    }

    fn sample_users(n: usize) -> Vec<ClientRecord> {
        (1..=n).map(|i| user(&format!("user{i}@example.com"), None)).collect()
    }

    #[test]
    fn test_matches_query_username_and_uuid() {
        let record = user("Alice@Example.com", Some("4F9D-ABC"));

        assert!(matches_query(&record, ""));
        assert!(matches_query(&record, "alice"));
        assert!(matches_query(&record, "EXAMPLE"));
        assert!(matches_query(&record, "4f9d"));
        assert!(!matches_query(&record, "bob"));
    }

    #[rstest]
    #[case(0, 5, 1)] // empty filter still shows one page
    #[case(1, 5, 1)]
    #[case(5, 5, 1)]
    #[case(6, 5, 2)]
    #[case(11, 5, 3)]
    fn test_page_count(#[case] filtered: usize, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(page_count(filtered, size), expected);
    }

    #[test]
    fn test_select_page_newest_first() {
        let users = sample_users(7);
        let page = select_page(&users, &UserQuery::default(), 5);

        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.filtered, 7);
        assert_eq!(page.total, 7);
        let names: Vec<&str> = page.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "user7@example.com",
                "user6@example.com",
                "user5@example.com",
                "user4@example.com",
                "user3@example.com"
            ]
        );
    }

    #[test]
    fn test_select_page_second_page() {
        let users = sample_users(7);
        let query = UserQuery {
            search: String::new(),
            page: 2,
        };
        let page = select_page(&users, &query, 5);

        assert_eq!(page.page, 2);
        let names: Vec<&str> = page.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["user2@example.com", "user1@example.com"]);
    }

    #[test]
    fn test_select_page_clamps_out_of_range_page() {
        let users = sample_users(7);
        let query = UserQuery {
            search: String::new(),
            page: 99,
        };
        let page = select_page(&users, &query, 5);

        assert_eq!(page.page, 2);
        assert_eq!(page.users.len(), 2);

        let query = UserQuery {
            search: String::new(),
            page: 0,
        };
        assert_eq!(select_page(&users, &query, 5).page, 1);
    }

    #[test]
    fn test_select_page_filter_applies_before_pagination() {
        let mut users = sample_users(10);
        users.push(user("special@example.com", None));

        let query = UserQuery {
            search: "special".to_string(),
            page: 1,
        };
        let page = select_page(&users, &query, 5);

        assert_eq!(page.filtered, 1);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.total, 11);
        assert_eq!(page.users[0].username, "special@example.com");
    }

    #[test]
    fn test_select_page_empty_filter_result() {
        let users = sample_users(3);
        let query = UserQuery {
            search: "nomatch".to_string(),
            page: 1,
        };
        let page = select_page(&users, &query, 5);

        assert!(page.users.is_empty());
        assert_eq!(page.page_count, 1);
        assert_eq!(page.page, 1);
    }
}
