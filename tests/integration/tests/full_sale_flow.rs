//! Integration test: full listing → approval → purchase → settlement flow.
//!
//! Drives the ledger end to end the way a marketplace front-end would:
//! list with royalty holders, collect approvals, assign buyers, quote and
//! pay shares, and verify ownership transfer, treasury accounting, and the
//! transaction log.

use parcel_core::{AccountId, Amount, BasisPoints, LedgerConfig, PropertyStatus};
use parcel_ledger::{MarketLedger, TransactionKind};

fn acct(s: &str) -> AccountId {
    AccountId::new(s).unwrap()
}

fn bps(v: u16) -> BasisPoints {
    BasisPoints::new(v).unwrap()
}

/// Helper: ledger with a flat listing fee and a purchase fee in bps.
fn marketplace(listing_fee: u128, purchase_fee_bps: u16) -> MarketLedger {
    let config = LedgerConfig::new(
        acct("0xadmin"),
        Amount::new(listing_fee),
        bps(purchase_fee_bps),
    )
    .unwrap();
    MarketLedger::new(config).unwrap()
}

// =========================================================================
// Single-buyer happy path
// =========================================================================

#[test]
fn test_single_buyer_full_sale() {
    // Price 10 ETH-equivalent, one royalty holder at 10%, purchase fee 2.5%.
    let ledger = marketplace(1_000_000_000_000_000, 250);
    let seller = acct("0xseller");
    let royalty = acct("0xroyalty");
    let buyer = acct("0xbuyer");
    let price = Amount::new(10_000_000_000_000_000_000);

    let id = ledger
        .list_property(
            &seller,
            "ipfs://QmVilla",
            price,
            vec![(royalty.clone(), bps(1_000))],
            ledger.listing_fee(),
        )
        .unwrap();

    let treasury_after_listing = ledger.treasury_balance();
    assert_eq!(treasury_after_listing, Amount::new(1_000_000_000_000_000));

    // Holder approves, seller assigns the buyer 100%.
    ledger.approve_property_sale(&royalty, id).unwrap();
    ledger
        .add_buyer(&seller, id, buyer.clone(), bps(10_000))
        .unwrap();
    assert_eq!(
        ledger.property_details(id).unwrap().status,
        PropertyStatus::UnderContract
    );

    // Buyer pays exactly the quoted amount.
    let quote = ledger.share_payment_quote(id, 0).unwrap();
    assert_eq!(quote.share_value, price);
    assert_eq!(quote.fee, Amount::new(250_000_000_000_000_000));

    let receipt = ledger
        .buy_property_share(&buyer, id, quote.total_due)
        .unwrap();
    assert!(receipt.finalized);
    assert_eq!(receipt.share_value, price);
    assert_eq!(receipt.seller, seller);

    // Receipts are what a front-end renders; they must serialize cleanly,
    // with amounts as decimal strings.
    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["property_id"], 1);
    assert_eq!(json["share_value"], "10000000000000000000");

    // Ownership transferred, status Sold.
    let details = ledger.property_details(id).unwrap();
    assert_eq!(details.status, PropertyStatus::Sold);
    assert_eq!(details.owner, buyer);
    assert!(details.created_at <= details.updated_at);
    assert!(details.updated_at <= chrono::Utc::now());

    // Treasury grew by exactly the fee portion.
    assert_eq!(
        ledger.treasury_balance(),
        treasury_after_listing.checked_add(quote.fee).unwrap()
    );

    // A Purchase transaction was appended with matching property and amount.
    let tx_ids = ledger.transactions_by_property(id, 10, 0).unwrap();
    let purchase = tx_ids
        .iter()
        .map(|&tid| ledger.transaction_details(tid).unwrap())
        .find(|tx| tx.kind == TransactionKind::Purchase)
        .expect("purchase transaction should be logged");
    assert_eq!(purchase.property_id, id);
    assert_eq!(purchase.amount, quote.share_value);
    assert_eq!(purchase.from, buyer);
    assert_eq!(purchase.to, seller);
}

#[test]
fn test_royalty_holders_are_paid_at_sale() {
    let ledger = marketplace(0, 0);
    let seller = acct("0xseller");
    let roy_a = acct("0xroy-a");
    let roy_b = acct("0xroy-b");
    let buyer = acct("0xbuyer");

    let id = ledger
        .list_property(
            &seller,
            "ipfs://QmFlat",
            Amount::new(1_000_000),
            vec![(roy_a.clone(), bps(1_000)), (roy_b.clone(), bps(500))],
            Amount::ZERO,
        )
        .unwrap();
    ledger.approve_property_sale(&roy_a, id).unwrap();
    ledger.approve_property_sale(&roy_b, id).unwrap();
    ledger.add_buyer(&seller, id, buyer.clone(), bps(10_000)).unwrap();

    let receipt = ledger
        .buy_property_share(&buyer, id, Amount::new(1_000_000))
        .unwrap();

    // 10% + 5% royalties split off the share value; seller gets the rest.
    assert_eq!(
        receipt.royalty_cuts,
        vec![
            (roy_a.clone(), Amount::new(100_000)),
            (roy_b.clone(), Amount::new(50_000)),
        ]
    );
    assert_eq!(ledger.balance_of(&roy_a), 100_000);
    assert_eq!(ledger.balance_of(&roy_b), 50_000);
    assert_eq!(ledger.balance_of(&seller), 850_000);
    assert_eq!(ledger.balance_of(&buyer), -1_000_000);

    // One RoyaltyPayment entry per holder.
    let royalty_txs: Vec<_> = ledger
        .transactions_by_property(id, 10, 0)
        .unwrap()
        .into_iter()
        .map(|tid| ledger.transaction_details(tid).unwrap())
        .filter(|tx| tx.kind == TransactionKind::RoyaltyPayment)
        .collect();
    assert_eq!(royalty_txs.len(), 2);
}

// =========================================================================
// Fractional multi-buyer settlement
// =========================================================================

#[test]
fn test_three_buyers_settle_in_turn() {
    let ledger = marketplace(0, 100);
    let seller = acct("0xseller");
    let id = ledger
        .list_property(
            &seller,
            "ipfs://QmTower",
            Amount::new(9_000_000),
            vec![],
            Amount::ZERO,
        )
        .unwrap();

    let buyers = [
        (acct("0xbuyer-a"), bps(3_000)),
        (acct("0xbuyer-b"), bps(3_000)),
        (acct("0xbuyer-c"), bps(4_000)),
    ];
    for (buyer, share) in &buyers {
        ledger.add_buyer(&seller, id, buyer.clone(), *share).unwrap();
    }

    // First two settle: property stays UnderContract with the seller.
    for (i, (buyer, _)) in buyers.iter().take(2).enumerate() {
        let quote = ledger.share_payment_quote(id, i).unwrap();
        let receipt = ledger.buy_property_share(buyer, id, quote.total_due).unwrap();
        assert!(!receipt.finalized);

        let details = ledger.property_details(id).unwrap();
        assert_eq!(details.status, PropertyStatus::UnderContract);
        assert_eq!(details.owner, seller);
    }

    // Last buyer completes 100% and becomes the recorded owner.
    let quote = ledger.share_payment_quote(id, 2).unwrap();
    let receipt = ledger
        .buy_property_share(&buyers[2].0, id, quote.total_due)
        .unwrap();
    assert!(receipt.finalized);

    let details = ledger.property_details(id).unwrap();
    assert_eq!(details.status, PropertyStatus::Sold);
    assert_eq!(details.owner, buyers[2].0);

    // Each buyer record carries its settled share value.
    for (i, (_, share)) in buyers.iter().enumerate() {
        let record = ledger.buyer_details(id, i).unwrap();
        assert!(record.has_paid);
        assert_eq!(
            record.amount_paid,
            Amount::new(9_000_000).bps_portion(*share).unwrap()
        );
    }

    // Seller collected the full price; treasury collected 1% of it.
    assert_eq!(ledger.balance_of(&seller), 9_000_000);
    assert_eq!(ledger.treasury_balance(), Amount::new(90_000));
}

#[test]
fn test_sold_property_shows_up_in_buyer_portfolio() {
    let ledger = marketplace(0, 0);
    let seller = acct("0xseller");
    let investor = acct("0xinvestor");

    let id = ledger
        .list_property(&seller, "ipfs://QmLoft", Amount::new(100), vec![], Amount::ZERO)
        .unwrap();
    ledger.add_buyer(&seller, id, investor.clone(), bps(10_000)).unwrap();
    ledger.buy_property_share(&investor, id, Amount::new(100)).unwrap();

    assert_eq!(ledger.properties_by_buyer(&investor, 10, 0), vec![id]);
    assert_eq!(
        ledger.properties_by_status(PropertyStatus::Sold, 10, 0),
        vec![id]
    );

    let stats = ledger.contract_statistics();
    assert_eq!(stats.sold_properties, 1);
    assert_eq!(stats.listed_properties, 0);
}
