use models::LedgerDatabase;
use std::collections::{BTreeSet, HashSet};

/// A record pointing at a client id that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub record: &'static str,
    pub record_id: i64,
    pub client_id: i64,
}

/// Ids appearing more than once, ascending and reported once each.
pub fn find_duplicate_ids<I: IntoIterator<Item = i64>>(ids: I) -> Vec<i64> {
    let mut seen = HashSet::new();
    let duplicates: BTreeSet<i64> = ids.into_iter().filter(|id| !seen.insert(*id)).collect();
    duplicates.into_iter().collect()
}

/// Transactions and client logins whose `client_id` is not a known client.
pub fn find_dangling_client_references(database: &LedgerDatabase) -> Vec<DanglingReference> {
    let known: HashSet<i64> = database.clients.iter().map(|c| c.id).collect();

    let transactions = database
        .transactions
        .iter()
        .filter(|t| !known.contains(&t.client_id))
        .map(|t| DanglingReference {
            record: "transaction",
            record_id: t.id,
            client_id: t.client_id,
        });

    let logins = database
        .client_logins
        .iter()
        .filter(|l| !known.contains(&l.client_id))
        .map(|l| DanglingReference {
            record: "client_login",
            record_id: l.id,
            client_id: l.client_id,
        });

    transactions.chain(logins).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_database;

    #[test]
    fn test_find_duplicate_ids() {
        assert_eq!(find_duplicate_ids(vec![3, 1, 2, 3, 1, 3]), vec![1, 3]);
        assert!(find_duplicate_ids(vec![1, 2, 3]).is_empty());
    }

    #[test]
    fn test_demo_database_has_no_dangling_references() {
        assert!(find_dangling_client_references(&demo_database()).is_empty());
    }

    #[test]
    fn test_removed_client_leaves_dangling_references() {
        let mut db = demo_database();
        db.clients.retain(|c| c.id != 2);

        let dangling = find_dangling_client_references(&db);
        assert_eq!(dangling.iter().filter(|d| d.record == "transaction").count(), 11);
        assert_eq!(
            dangling.last(),
            Some(&DanglingReference {
                record: "client_login",
                record_id: 2,
                client_id: 2
            })
        );
    }
}
