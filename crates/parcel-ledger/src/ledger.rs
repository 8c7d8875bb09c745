use std::sync::RwLock;

use parcel_core::{
    AccountId, Amount, BasisPoints, CoreError, LedgerConfig, PropertyEvent, PropertyStateMachine,
    PropertyStatus, PropertyId, TransactionId, BPS_FULL, MAX_PURCHASE_FEE_BPS,
};

use crate::accounts::AccountBook;
use crate::error::LedgerError;
use crate::property::{Buyer, PropertyDetails, RoyaltyHolder};
use crate::registry::PropertyRegistry;
use crate::royalty;
use crate::sale::{self, PaymentQuote, PurchaseReceipt};
use crate::stats::{self, ContractStatistics};
use crate::transactions::{Transaction, TransactionKind, TransactionLog};
use crate::treasury::Treasury;

/// Internal account the treasury's fee balance is booked against.
const TREASURY_ACCOUNT: &str = "parcel:treasury";

/// Authoritative mutable state, guarded by a single lock.
struct LedgerState {
    config: LedgerConfig,
    registry: PropertyRegistry,
    treasury: Treasury,
    log: TransactionLog,
}

/// The marketplace settlement ledger.
///
/// Every command executes atomically under a single write lock: no command
/// observes a partially-applied effect of another, and a failed command is
/// indistinguishable from a no-op (all fallible work happens before the
/// first mutation). Queries share a read lock and observe a consistent
/// snapshot.
pub struct MarketLedger {
    state: RwLock<LedgerState>,
    accounts: AccountBook,
    treasury_account: AccountId,
}

impl MarketLedger {
    /// Create a ledger with the given configuration.
    pub fn new(config: LedgerConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            state: RwLock::new(LedgerState {
                config,
                registry: PropertyRegistry::new(),
                treasury: Treasury::new(),
                log: TransactionLog::new(),
            }),
            accounts: AccountBook::new(),
            treasury_account: AccountId::new(TREASURY_ACCOUNT)?,
        })
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// List a property. The caller attaches `payment`, which must cover the
    /// listing fee; any excess is not refunded here (a wallet-layer
    /// concern).
    pub fn list_property(
        &self,
        caller: &AccountId,
        metadata_uri: &str,
        price: Amount,
        royalty_holders: Vec<(AccountId, BasisPoints)>,
        payment: Amount,
    ) -> Result<PropertyId, LedgerError> {
        let mut guard = self.state.write().unwrap();
        let state = &mut *guard;

        state
            .registry
            .validate_listing(metadata_uri, price, &royalty_holders)?;

        let fee = state.config.listing_fee;
        if payment < fee {
            return Err(LedgerError::InsufficientPayment {
                attached: payment,
                required: fee,
            });
        }

        state.treasury.credit(fee)?;
        let id = state
            .registry
            .insert(caller.clone(), metadata_uri.to_string(), price, royalty_holders);

        if !fee.is_zero() {
            self.accounts
                .record_transfer(caller, &self.treasury_account, fee, Some(id));
            state.log.append(
                id,
                caller.clone(),
                self.treasury_account.clone(),
                fee,
                TransactionKind::Listing,
            );
        }

        tracing::info!(property_id = %id, owner = %caller, price = %price, "property listed");
        Ok(id)
    }

    /// Update price and metadata pointer. Owner-only, and only while the
    /// property is still Listed.
    pub fn update_property(
        &self,
        caller: &AccountId,
        id: PropertyId,
        new_price: Amount,
        new_metadata_uri: &str,
    ) -> Result<(), LedgerError> {
        let mut guard = self.state.write().unwrap();
        let property = guard.registry.get_mut(id)?;

        if &property.owner != caller {
            return Err(LedgerError::NotOwner(caller.clone()));
        }
        if property.status != PropertyStatus::Listed {
            return Err(LedgerError::InvalidState(property.status));
        }
        if new_price.is_zero() {
            return Err(LedgerError::InvalidInput(
                "price must be greater than zero".into(),
            ));
        }
        if new_metadata_uri.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "metadata URI must not be empty".into(),
            ));
        }

        property.price = new_price;
        property.metadata_uri = new_metadata_uri.to_string();
        property.touch();

        tracing::info!(property_id = %id, price = %new_price, "property updated");
        Ok(())
    }

    /// Withdraw a listing. Owner-only; allowed from Listed or
    /// UnderContract. Irreversible.
    pub fn cancel_listing(&self, caller: &AccountId, id: PropertyId) -> Result<(), LedgerError> {
        let mut guard = self.state.write().unwrap();
        let property = guard.registry.get_mut(id)?;

        if &property.owner != caller {
            return Err(LedgerError::NotOwner(caller.clone()));
        }
        let new_status =
            PropertyStateMachine::transition(property.status, PropertyEvent::ListingCancelled)
                .map_err(|_| LedgerError::InvalidState(property.status))?;

        property.status = new_status;
        property.touch();

        tracing::info!(property_id = %id, "listing cancelled");
        Ok(())
    }

    /// Assign a buyer a fractional share. Owner-only. The first buyer
    /// commits the listing (Listed → UnderContract); later buyers join
    /// while the property is under contract.
    pub fn add_buyer(
        &self,
        caller: &AccountId,
        id: PropertyId,
        buyer: AccountId,
        share_bps: BasisPoints,
    ) -> Result<(), LedgerError> {
        let mut guard = self.state.write().unwrap();
        let property = guard.registry.get_mut(id)?;

        if &property.owner != caller {
            return Err(LedgerError::NotOwner(caller.clone()));
        }
        if !matches!(
            property.status,
            PropertyStatus::Listed | PropertyStatus::UnderContract
        ) {
            return Err(LedgerError::InvalidState(property.status));
        }
        sale::validate_new_buyer(property, &buyer, share_bps)?;

        // Compute the transition before mutating so a rejected transition
        // cannot leave a half-applied buyer list.
        let new_status = if property.status == PropertyStatus::Listed {
            Some(PropertyStateMachine::transition(
                property.status,
                PropertyEvent::BuyerAdded,
            )?)
        } else {
            None
        };

        property.buyers.push(Buyer {
            buyer: buyer.clone(),
            share_bps,
            amount_paid: Amount::ZERO,
            has_paid: false,
        });
        if let Some(status) = new_status {
            property.status = status;
        }
        property.touch();

        tracing::info!(property_id = %id, buyer = %buyer, share = %share_bps, "buyer added");
        Ok(())
    }

    /// Record a royalty holder's approval of the sale.
    pub fn approve_property_sale(
        &self,
        caller: &AccountId,
        id: PropertyId,
    ) -> Result<(), LedgerError> {
        let mut guard = self.state.write().unwrap();
        let property = guard.registry.get_mut(id)?;

        royalty::approve(property, caller)?;
        property.touch();

        tracing::info!(property_id = %id, holder = %caller, "royalty holder approved sale");
        Ok(())
    }

    /// Settle the caller's share. Payable: `payment` must cover the quoted
    /// `share_value + fee`. When this payment brings the cumulative settled
    /// share to 100%, the property transfers to the caller and finalizes
    /// as Sold.
    pub fn buy_property_share(
        &self,
        caller: &AccountId,
        id: PropertyId,
        payment: Amount,
    ) -> Result<PurchaseReceipt, LedgerError> {
        let mut guard = self.state.write().unwrap();
        let state = &mut *guard;
        let property = state.registry.get_mut(id)?;

        if property.status.is_final() {
            return Err(LedgerError::InvalidState(property.status));
        }
        let (buyer_index, buyer) =
            property
                .buyer(caller)
                .ok_or_else(|| LedgerError::NotABuyer {
                    caller: caller.clone(),
                    property: id,
                })?;
        if buyer.has_paid {
            return Err(LedgerError::AlreadyPaid(caller.clone()));
        }
        if !royalty::all_approvals_in_place(property) {
            return Err(LedgerError::ApprovalsIncomplete(id));
        }

        let share_bps = buyer.share_bps;
        let plan = sale::settlement_plan(property, buyer_index, state.config.purchase_fee_bps)?;
        if payment < plan.quote.total_due {
            return Err(LedgerError::InsufficientPayment {
                attached: payment,
                required: plan.quote.total_due,
            });
        }

        // Will this payment complete the sale? Resolve the transition
        // before mutating anything.
        let finalized =
            property.paid_share_bps() + share_bps.value() as u32 == BPS_FULL as u32;
        let final_status = if finalized {
            Some(PropertyStateMachine::transition(
                property.status,
                PropertyEvent::SaleFinalized,
            )?)
        } else {
            None
        };

        // All preconditions passed — mutate. The treasury credit is the
        // only remaining fallible step, so it goes first.
        state.treasury.credit(plan.quote.fee)?;

        let seller = property.owner.clone();
        {
            let buyer = &mut property.buyers[buyer_index];
            buyer.has_paid = true;
            buyer.amount_paid = plan.quote.share_value;
        }
        if let Some(status) = final_status {
            property.status = status;
            property.owner = caller.clone();
        }
        property.touch();

        if !plan.quote.fee.is_zero() {
            self.accounts.record_transfer(
                caller,
                &self.treasury_account,
                plan.quote.fee,
                Some(id),
            );
        }
        for (holder, cut) in &plan.royalty_cuts {
            self.accounts.record_transfer(caller, holder, *cut, Some(id));
            state.log.append(
                id,
                caller.clone(),
                holder.clone(),
                *cut,
                TransactionKind::RoyaltyPayment,
            );
        }
        self.accounts
            .record_transfer(caller, &seller, plan.seller_proceeds, Some(id));
        state.log.append(
            id,
            caller.clone(),
            seller.clone(),
            plan.quote.share_value,
            TransactionKind::Purchase,
        );

        tracing::info!(
            property_id = %id,
            buyer = %caller,
            share_value = %plan.quote.share_value,
            fee = %plan.quote.fee,
            finalized,
            "property share purchased"
        );

        Ok(PurchaseReceipt {
            property_id: id,
            buyer: caller.clone(),
            share_bps,
            share_value: plan.quote.share_value,
            fee: plan.quote.fee,
            seller,
            royalty_cuts: plan.royalty_cuts,
            finalized,
        })
    }

    /// Set the flat listing fee. Admin-only.
    pub fn update_listing_fee(
        &self,
        caller: &AccountId,
        new_fee: Amount,
    ) -> Result<(), LedgerError> {
        let mut guard = self.state.write().unwrap();
        if caller != &guard.config.admin {
            return Err(LedgerError::NotAdmin(caller.clone()));
        }
        guard.config.listing_fee = new_fee;
        tracing::info!(fee = %new_fee, "listing fee updated");
        Ok(())
    }

    /// Set the purchase fee percentage. Admin-only, capped at 1000 bps.
    pub fn update_purchase_fee(
        &self,
        caller: &AccountId,
        new_bps: BasisPoints,
    ) -> Result<(), LedgerError> {
        let mut guard = self.state.write().unwrap();
        if caller != &guard.config.admin {
            return Err(LedgerError::NotAdmin(caller.clone()));
        }
        if new_bps.value() > MAX_PURCHASE_FEE_BPS {
            return Err(LedgerError::InvalidInput(format!(
                "purchase fee {} exceeds the {} bps cap",
                new_bps.value(),
                MAX_PURCHASE_FEE_BPS
            )));
        }
        guard.config.purchase_fee_bps = new_bps;
        tracing::info!(fee_bps = new_bps.value(), "purchase fee updated");
        Ok(())
    }

    /// Drain the treasury to the admin. Fails fast on a zero balance.
    pub fn withdraw_all(&self, caller: &AccountId) -> Result<Amount, LedgerError> {
        let mut guard = self.state.write().unwrap();
        if caller != &guard.config.admin {
            return Err(LedgerError::NotAdmin(caller.clone()));
        }
        let amount = guard.treasury.withdraw_all()?;
        self.accounts
            .record_transfer(&self.treasury_account, caller, amount, None);

        tracing::info!(amount = %amount, "treasury withdrawn");
        Ok(amount)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Flat summary of a property.
    pub fn property_details(&self, id: PropertyId) -> Result<PropertyDetails, LedgerError> {
        let guard = self.state.read().unwrap();
        Ok(PropertyDetails::from(guard.registry.get(id)?))
    }

    /// Royalty holder record by index.
    pub fn royalty_holder_details(
        &self,
        id: PropertyId,
        index: usize,
    ) -> Result<RoyaltyHolder, LedgerError> {
        let guard = self.state.read().unwrap();
        guard
            .registry
            .get(id)?
            .royalty_holders
            .get(index)
            .cloned()
            .ok_or_else(|| {
                LedgerError::NotFound(format!("no royalty holder at index {} for {}", index, id))
            })
    }

    /// Buyer record by index.
    pub fn buyer_details(&self, id: PropertyId, index: usize) -> Result<Buyer, LedgerError> {
        let guard = self.state.read().unwrap();
        guard
            .registry
            .get(id)?
            .buyers
            .get(index)
            .cloned()
            .ok_or_else(|| {
                LedgerError::NotFound(format!("no buyer at index {} for {}", index, id))
            })
    }

    /// Ids of properties in a status, in id order, paginated.
    pub fn properties_by_status(
        &self,
        status: PropertyStatus,
        limit: usize,
        offset: usize,
    ) -> Vec<PropertyId> {
        let guard = self.state.read().unwrap();
        guard
            .registry
            .iter()
            .filter(|p| p.status == status)
            .map(|p| p.id)
            .skip(offset)
            .take(limit)
            .collect()
    }

    /// Ids of properties where `account` is a registered buyer.
    pub fn properties_by_buyer(
        &self,
        account: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Vec<PropertyId> {
        let guard = self.state.read().unwrap();
        guard
            .registry
            .iter()
            .filter(|p| p.buyer(account).is_some())
            .map(|p| p.id)
            .skip(offset)
            .take(limit)
            .collect()
    }

    /// Ids of transactions touching a property, oldest first.
    pub fn transactions_by_property(
        &self,
        id: PropertyId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<TransactionId>, LedgerError> {
        let guard = self.state.read().unwrap();
        guard.registry.get(id)?;
        Ok(guard.log.by_property(id, limit, offset))
    }

    /// A single transaction log entry.
    pub fn transaction_details(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        let guard = self.state.read().unwrap();
        guard
            .log
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("{}", id)))
    }

    /// Number of properties ever listed.
    pub fn total_properties(&self) -> u64 {
        self.state.read().unwrap().registry.len() as u64
    }

    /// Derived aggregates over the current snapshot.
    pub fn contract_statistics(&self) -> ContractStatistics {
        let guard = self.state.read().unwrap();
        stats::compute(&guard.registry, &guard.log)
    }

    /// Whether every royalty holder for the property has approved.
    pub fn are_all_approvals_in_place(&self, id: PropertyId) -> Result<bool, LedgerError> {
        let guard = self.state.read().unwrap();
        Ok(royalty::all_approvals_in_place(guard.registry.get(id)?))
    }

    /// Quote what the buyer at `buyer_index` owes.
    pub fn share_payment_quote(
        &self,
        id: PropertyId,
        buyer_index: usize,
    ) -> Result<PaymentQuote, LedgerError> {
        let guard = self.state.read().unwrap();
        sale::payment_quote(
            guard.registry.get(id)?,
            buyer_index,
            guard.config.purchase_fee_bps,
        )
    }

    /// Current flat listing fee.
    pub fn listing_fee(&self) -> Amount {
        self.state.read().unwrap().config.listing_fee
    }

    /// Current purchase fee percentage.
    pub fn purchase_fee(&self) -> BasisPoints {
        self.state.read().unwrap().config.purchase_fee_bps
    }

    /// The platform admin identity.
    pub fn admin(&self) -> AccountId {
        self.state.read().unwrap().config.admin.clone()
    }

    /// Current treasury balance.
    pub fn treasury_balance(&self) -> Amount {
        self.state.read().unwrap().treasury.balance()
    }

    /// Signed account-book balance for an identity.
    pub fn balance_of(&self, account: &AccountId) -> i128 {
        self.accounts.balance_of(account)
    }

    /// The internal account the treasury is booked against.
    pub fn treasury_account(&self) -> &AccountId {
        &self.treasury_account
    }
}
