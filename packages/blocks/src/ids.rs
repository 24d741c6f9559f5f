use uuid::Uuid;

/// Fresh opaque id for a page, block or revision
///
/// UUID v7 ids sort by creation time, which gives listings a stable tiebreak
/// when two records share a timestamp.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct() {
        let ids: std::collections::HashSet<String> = (0..64).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 64);
    }
}
