//! Integration test: admin-gated fee schedule and treasury withdrawal.

use parcel_core::{AccountId, Amount, BasisPoints, LedgerConfig};
use parcel_ledger::{LedgerError, MarketLedger};

fn acct(s: &str) -> AccountId {
    AccountId::new(s).unwrap()
}

fn bps(v: u16) -> BasisPoints {
    BasisPoints::new(v).unwrap()
}

#[test]
fn test_withdraw_twice_second_fails() {
    let config = LedgerConfig::new(acct("0xadmin"), Amount::new(250), bps(0)).unwrap();
    let ledger = MarketLedger::new(config).unwrap();
    let admin = acct("0xadmin");

    // Two listings accumulate two listing fees.
    for uri in ["ipfs://QmA", "ipfs://QmB"] {
        ledger
            .list_property(&acct("0xseller"), uri, Amount::new(1_000), vec![], Amount::new(250))
            .unwrap();
    }

    let balance_before = ledger.treasury_balance();
    assert_eq!(balance_before, Amount::new(500));

    // First withdrawal drains exactly the prior balance.
    let withdrawn = ledger.withdraw_all(&admin).unwrap();
    assert_eq!(withdrawn, balance_before);
    assert_eq!(ledger.treasury_balance(), Amount::ZERO);

    // Immediate second withdrawal fails fast.
    assert!(matches!(
        ledger.withdraw_all(&admin),
        Err(LedgerError::NothingToWithdraw)
    ));
}

#[test]
fn test_fee_changes_apply_to_subsequent_operations() {
    let config = LedgerConfig::new(acct("0xadmin"), Amount::ZERO, bps(0)).unwrap();
    let ledger = MarketLedger::new(config).unwrap();
    let admin = acct("0xadmin");
    let seller = acct("0xseller");

    // Free listing while the fee is zero.
    ledger
        .list_property(&seller, "ipfs://QmFree", Amount::new(1_000), vec![], Amount::ZERO)
        .unwrap();

    // Admin raises the listing fee; the old payment no longer suffices.
    ledger.update_listing_fee(&admin, Amount::new(100)).unwrap();
    let result =
        ledger.list_property(&seller, "ipfs://QmPaid", Amount::new(1_000), vec![], Amount::ZERO);
    assert!(matches!(
        result,
        Err(LedgerError::InsufficientPayment { .. })
    ));

    // Purchase fee changes show up in fresh quotes.
    let id = ledger
        .list_property(&seller, "ipfs://QmPaid", Amount::new(1_000), vec![], Amount::new(100))
        .unwrap();
    ledger.add_buyer(&seller, id, acct("0xbuyer"), bps(10_000)).unwrap();

    let quote_before = ledger.share_payment_quote(id, 0).unwrap();
    assert_eq!(quote_before.fee, Amount::ZERO);

    ledger.update_purchase_fee(&admin, bps(500)).unwrap();
    let quote_after = ledger.share_payment_quote(id, 0).unwrap();
    assert_eq!(quote_after.fee, Amount::new(50));
    assert_eq!(quote_after.total_due, Amount::new(1_050));
}

#[test]
fn test_non_admin_cannot_touch_fees_or_treasury() {
    let config = LedgerConfig::new(acct("0xadmin"), Amount::new(10), bps(100)).unwrap();
    let ledger = MarketLedger::new(config).unwrap();
    let mallory = acct("0xmallory");

    assert!(matches!(
        ledger.update_listing_fee(&mallory, Amount::ZERO),
        Err(LedgerError::NotAdmin(_))
    ));
    assert!(matches!(
        ledger.update_purchase_fee(&mallory, bps(0)),
        Err(LedgerError::NotAdmin(_))
    ));
    assert!(matches!(
        ledger.withdraw_all(&mallory),
        Err(LedgerError::NotAdmin(_))
    ));

    // Schedule unchanged.
    assert_eq!(ledger.listing_fee(), Amount::new(10));
    assert_eq!(ledger.purchase_fee(), bps(100));
}

#[test]
fn test_config_toml_roundtrip_boots_a_ledger() {
    let doc = r#"
        admin = "0xadmin"
        listing_fee = "1000"
        purchase_fee_bps = 250
    "#;
    let config = LedgerConfig::from_toml_str(doc).unwrap();
    let ledger = MarketLedger::new(config).unwrap();

    assert_eq!(ledger.admin(), acct("0xadmin"));
    assert_eq!(ledger.listing_fee(), Amount::new(1_000));
    assert_eq!(ledger.purchase_fee(), bps(250));
}
