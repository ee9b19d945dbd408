use std::sync::Arc;

use doppelcheck_evidence::EvidenceVault;
use doppelcheck_models::VerificationResult;
use doppelcheck_nullables::{NullBackend, NullClock};
use doppelcheck_trust::TrustLedger;
use doppelcheck_types::{Claim, Fingerprint, NormalizedSource};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn stored() -> (EvidenceVault, Arc<NullBackend>, Fingerprint, Vec<u8>) {
    let backend = Arc::new(NullBackend::new());
    let vault = EvidenceVault::new(backend.clone(), Arc::new(NullClock::default()));
    let sources = vec![NormalizedSource {
        url: "https://example.org/sky".into(),
        content: "Rayleigh scattering".into(),
        source_type: "article".into(),
        validated: true,
    }];
    let mut ledger = TrustLedger::default();
    ledger
        .build(&[Claim::statement("The sky is blue")], &sources)
        .unwrap();
    let verdict = VerificationResult::new("verified", 0.95, vec![]);
    let id = runtime()
        .block_on(vault.store("The sky is blue", &sources, &verdict, ledger.chain()))
        .unwrap();
    let bytes = backend.get_raw(&id.to_hex()).unwrap();
    (vault, backend, id, bytes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Flipping the low bit of any stored byte is caught.
    #[test]
    fn any_flipped_byte_is_detected(position in any::<prop::sample::Index>()) {
        let (vault, backend, id, mut bytes) = stored();
        let i = position.index(bytes.len());
        bytes[i] ^= 0x01;
        backend.put_raw(&id.to_hex(), bytes);

        let err = runtime().block_on(vault.verify_integrity(&id)).unwrap_err();
        prop_assert!(err.is_integrity_violation(), "byte {}: {:?}", i, err);
    }

    /// Switching the case of any letter is caught, including hex digits and
    /// the timestamp's `T`/`Z` that decode to the same value either way.
    #[test]
    fn any_case_flip_is_detected(position in any::<prop::sample::Index>()) {
        let (vault, backend, id, mut bytes) = stored();
        let letters: Vec<usize> = bytes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .collect();
        let i = *position.get(&letters);
        bytes[i] ^= 0x20;
        backend.put_raw(&id.to_hex(), bytes);

        let err = runtime().block_on(vault.verify_integrity(&id)).unwrap_err();
        prop_assert!(err.is_integrity_violation(), "byte {}: {:?}", i, err);
    }

    /// Extra digits after any stored float are caught, even trailing zeros
    /// that parse back to the same number.
    #[test]
    fn float_tail_is_detected(
        field in prop::sample::select(vec![
            "confidence_score",
            "source_reliability",
            "claim_consistency",
            "evidence_quality",
        ]),
        tail in "[0-9]{1,12}",
    ) {
        let (vault, backend, id, bytes) = stored();
        let raw = String::from_utf8(bytes).unwrap();
        let key = format!("\"{field}\":");
        let start = raw.find(&key).unwrap() + key.len();
        let len = raw[start..]
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap();
        let mut tampered = raw.clone();
        tampered.insert_str(start + len, &tail);
        backend.put_raw(&id.to_hex(), tampered.into_bytes());

        let err = runtime().block_on(vault.verify_integrity(&id)).unwrap_err();
        prop_assert!(err.is_integrity_violation(), "{}{}: {:?}", field, tail, err);
    }
}
