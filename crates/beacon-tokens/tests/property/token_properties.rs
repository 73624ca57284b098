use beacon_tokens::TokenCounter;
use proptest::prelude::*;

fn counter() -> TokenCounter {
    TokenCounter::new(1_000).unwrap()
}

proptest! {
    #[test]
    fn cached_equals_uncached(s in ".{0,200}") {
        let counter = counter();
        prop_assert_eq!(counter.count(&s), counter.count_cached(&s));
    }

    #[test]
    fn count_equals_encoded_length(s in ".{0,200}") {
        let counter = counter();
        prop_assert_eq!(counter.count(&s), counter.encode(&s).len());
    }

    #[test]
    fn subadditivity(a in ".{0,100}", b in ".{0,100}") {
        let counter = counter();
        let combined = format!("{a}{b}");
        let (ca, cb, cc) = (counter.count(&a), counter.count(&b), counter.count(&combined));
        prop_assert!(cc <= ca + cb + 1, "{} <= {} + {} + 1", cc, ca, cb);
    }

    #[test]
    fn full_decode_is_lossless(s in "\\PC{0,120}") {
        let counter = counter();
        prop_assert_eq!(counter.decode_lossy(&counter.encode(&s)), s);
    }

    #[test]
    fn count_is_bounded_by_bytes(s in ".{1,100}") {
        let counter = counter();
        prop_assert!(counter.count(&s) <= s.len());
    }
}
