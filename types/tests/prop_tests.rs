use proptest::prelude::*;

use ballot_types::{ProposalName, VoterAddress};

proptest! {
    /// Display output always parses back to the same address.
    #[test]
    fn address_display_parses_back(bytes in prop::array::uniform20(0u8..)) {
        let addr = VoterAddress::new(bytes);
        let parsed: VoterAddress = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// Addresses survive a JSON trip as hex strings.
    #[test]
    fn address_json_is_a_hex_string(bytes in prop::array::uniform20(0u8..)) {
        let addr = VoterAddress::new(bytes);
        let json = serde_json::to_string(&addr).unwrap();
        prop_assert_eq!(&json, &format!("\"{}\"", addr));
        let back: VoterAddress = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, addr);
    }

    /// Any short label without interior zero bytes reads back unchanged.
    #[test]
    fn label_reads_back(label in "[A-Za-z0-9 _-]{0,31}") {
        let name = ProposalName::from_label(&label).unwrap();
        prop_assert_eq!(name.as_label(), label);
    }

    /// Labels over 31 bytes are always rejected.
    #[test]
    fn long_labels_rejected(label in "[a-z]{32,64}") {
        prop_assert!(ProposalName::from_label(&label).is_err());
    }
}
