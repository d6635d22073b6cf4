// TTL behavior of the disk store: lazy expiry with purge on read, and
// magnitude 0 disabling the check entirely.

#[cfg(test)]
mod test {

    use chrono::{TimeZone, Utc};

    use crate::cache::store::ObjectStore;
    use crate::cache::ttl::{CacheTtl, TtlUnit};
    use crate::tests::common::{seconds, sleep, temp_store, Duration};

    #[test]
    fn entry_expires_and_is_purged_on_read() {
        let (_dir, store) = temp_store("exp", seconds(1));

        store.put("k", b"payload".to_vec());
        assert_eq!(store.get("k"), Some(b"payload".to_vec()));

        sleep(Duration::from_millis(1200));
        assert_eq!(store.get("k"), None);
        // purge happened on the first stale read; a second read stays absent
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn zero_magnitude_never_expires() {
        let (_dir, store) = temp_store("noexp", seconds(0));

        store.put("k", b"payload".to_vec());
        sleep(Duration::from_millis(1200));
        assert_eq!(store.get("k"), Some(b"payload".to_vec()));
    }

    #[test]
    fn overwrite_resets_the_ttl_window() {
        let (_dir, store) = temp_store("ow", seconds(1));

        store.put("k", b"first".to_vec());
        sleep(Duration::from_millis(700));
        store.put("k", b"second".to_vec());
        sleep(Duration::from_millis(700));

        // 1.4s after the first write, 0.7s after the second: still fresh,
        // and only the second payload is retrievable
        assert_eq!(store.get("k"), Some(b"second".to_vec()));
    }

    #[test]
    fn month_ttl_is_calendar_aware() {
        // a month is however long that month is, not 30 fixed days
        let ttl = CacheTtl::new(TtlUnit::Months, 1);
        let created = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();

        let before = Utc.with_ymd_and_hms(2024, 2, 29, 11, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 2, 29, 13, 0, 0).unwrap();
        assert!(!ttl.expired(created, before));
        assert!(ttl.expired(created, after));
    }

    #[test]
    fn purge_is_a_noop_when_absent() {
        let (_dir, store) = temp_store("pg", seconds(0));

        store.purge("never-written");
        // racing double-purge must also be a no-op
        store.purge("never-written");
    }
}
