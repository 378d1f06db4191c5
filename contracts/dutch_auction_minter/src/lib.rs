#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # Gallery Protocol — Linear Dutch Auction Minter
///
/// **Role:** Time-based descending-price sale mechanism for one project
/// catalog.  Each project's artist configures a price schedule; collectors
/// buy at the current price; tokens are issued through the GenArtCore
/// contract, which this minter must be assigned to for every project it
/// sells.
///
/// **Price schedule:**
/// ```text
///   price
///     │ start_price ─┐
///     │              \
///     │               \        linear decay, floor division,
///     │                \       per-second granularity
///     │                 \
///     │ base_price ─ ─ ─ ┴──────────────
///     └────────────┬─────┬─────────────► time
///             start_time  end_time
/// ```
///
/// **Roles (resolved fresh on every call, never cached):**
/// - *Artist* — `set_auction_details` for their own project.
/// - *Operator* (core whitelist) — `reset_auction_details`,
///   `set_minimum_auction_length_seconds`.
/// - anyone assigned through the core — `purchase` / `purchase_to`.
///
/// **Settlement:** admission → quote → funds check → issuance → refund of
/// any overpayment → remittance of the price to the artist, all inside a
/// single process-wide reentrancy lock.  Any failure aborts the whole call;
/// the minter never retains funds.
#[ink::contract]
mod dutch_auction_minter {
    use ink::env::call::{build_call, ExecutionInput, Selector};
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    pub type ProjectId = u64;
    pub type TokenId = u64;

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    /// Shortest auction an artist may configure, unless an operator lowers
    /// or raises the process-wide value after deployment.
    pub const DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS: u64 = 3_600;

    /// The auction ledger operates in Unix seconds; the chain reports
    /// milliseconds.
    pub const MILLIS_PER_SECOND: u64 = 1_000;

    /// Sales are denominated in the chain's native currency.
    pub const CURRENCY_SYMBOL: &str = "QF";

    // =========================================================================
    // STORAGE
    // =========================================================================

    /// Per-project auction parameters.  A default (zeroed) record means
    /// "not configured"; `reset_auction_details` restores that state.
    ///
    /// Invariants while `configured`:
    /// `end_time > start_time`, `start_price > base_price`, and the window
    /// was at least the minimum length in force at configuration time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, scale::Encode, scale::Decode)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub struct AuctionRecord {
        /// Auction activation instant (Unix seconds).
        pub start_time: u64,
        /// Instant the price floor is reached and held (Unix seconds).
        pub end_time: u64,
        /// Price at `start_time`.
        pub start_price: Balance,
        /// Floor price at and after `end_time`.
        pub base_price: Balance,
        pub configured: bool,
    }

    /// Advisory quote returned by `get_price_info`.  Tolerates a not-yet-
    /// started auction (quotes `start_price`); only the purchase path
    /// rejects pre-start attempts.
    #[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub struct PriceInfo {
        pub is_configured: bool,
        pub token_price: Balance,
        pub currency_symbol: String,
        /// Zero address: native currency, no token contract involved.
        pub currency_address: AccountId,
    }

    /// Roles a privileged entry point may demand.  Carried inside
    /// [`Error::Unauthorized`] so callers learn which role was missing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Role {
        /// The project's artist, per the core catalog.
        Artist,
        /// A member of the core's operator whitelist.
        Operator,
    }

    #[ink(storage)]
    pub struct DutchAuctionMinter {
        /// The GenArtCore contract: project catalog, operator whitelist,
        /// minter assignments, token ledger.
        core: AccountId,

        /// Process-wide floor on `end_time - start_time`.  Changing it does
        /// not retroactively invalidate configured auctions.
        minimum_auction_length_seconds: u64,

        /// The auction ledger, one record per project.
        auctions: Mapping<ProjectId, AuctionRecord>,

        /// Reentrancy flag, deliberately process-wide rather than
        /// per-project.  Set for the duration of one settlement.
        settlement_in_progress: bool,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Emitted on every successful auction (re)configuration.
    #[ink(event)]
    pub struct SetAuctionDetails {
        #[ink(topic)]
        project_id: ProjectId,
        start_time: u64,
        end_time: u64,
        start_price: Balance,
        base_price: Balance,
    }

    /// Emitted when an operator clears a project's auction record.
    #[ink(event)]
    pub struct ResetAuctionDetails {
        #[ink(topic)]
        project_id: ProjectId,
    }

    #[ink(event)]
    pub struct MinimumAuctionLengthSecondsUpdated {
        minimum_auction_length_seconds: u64,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller does not hold the role this entry point demands.
        Unauthorized(Role),
        /// This minter is not assigned to the project on the core.
        NotAuthorizedMinter,
        /// The project has no configured auction.
        AuctionNotConfigured,
        /// The auction's start instant is still in the future.
        AuctionNotStarted,
        /// Attached payment is below the current price.
        InsufficientPayment,
        /// Returning the overpayment to the payer failed.  The whole
        /// purchase is aborted: the minter never retains excess funds.
        RefundFailed,
        /// Remitting the sale price to the artist failed.
        ArtistPaymentFailed,
        /// A settlement re-entered the minter before the outer settlement
        /// completed.
        ReentrantCall,
        /// `end_time <= start_time`, or the window is shorter than the
        /// minimum auction length.
        InvalidAuctionWindow,
        /// `start_price <= base_price`: the schedule would not descend.
        InvalidPriceOrdering,
        /// The auction is running; artists cannot change the schedule
        /// mid-sale.  An operator reset is the only way out.
        LockedMidAuction,
        /// This auction variant never restricts `purchase_to`; the toggle
        /// exists only for interface uniformity.
        ActionNotSupported,
        /// A call into the core contract failed or was rejected.
        CoreCallFailed,
        /// An arithmetic operation overflowed.
        Overflow,
    }

    // =========================================================================
    // PRICING ENGINE
    // =========================================================================

    /// Current unit price as a pure function of the record and wall-clock
    /// seconds.  Clamped to `start_price` before the window and to
    /// `base_price` at and after `end_time`; inside the window the price
    /// decays linearly with floor division, so it moves at per-second
    /// granularity and never leaves `[base_price, start_price]`.
    fn linear_price(record: &AuctionRecord, now: u64) -> Result<Balance, Error> {
        if now >= record.end_time {
            return Ok(record.base_price);
        }
        if now <= record.start_time {
            return Ok(record.start_price);
        }
        let elapsed = (now - record.start_time) as u128;
        let duration = (record.end_time - record.start_time) as u128;
        let total_decay = record.start_price.saturating_sub(record.base_price);
        let decay = total_decay.checked_mul(elapsed).ok_or(Error::Overflow)? / duration;
        Ok(record.start_price.saturating_sub(decay))
    }

    /// Enforcing variant used by settlement: unconfigured and not-yet-
    /// started auctions are rejected rather than quoted.
    fn purchase_price(record: &AuctionRecord, now: u64) -> Result<Balance, Error> {
        if !record.configured {
            return Err(Error::AuctionNotConfigured);
        }
        if now < record.start_time {
            return Err(Error::AuctionNotStarted);
        }
        linear_price(record, now)
    }

    /// The mid-auction lock: a configured record with `now` inside
    /// `[start_time, end_time)`.  Derived, never stored.
    fn auction_is_live(record: &AuctionRecord, now: u64) -> bool {
        record.configured && now >= record.start_time && now < record.end_time
    }

    fn validate_auction_schedule(
        start_time: u64,
        end_time: u64,
        start_price: Balance,
        base_price: Balance,
        minimum_length_seconds: u64,
    ) -> Result<(), Error> {
        if end_time <= start_time {
            return Err(Error::InvalidAuctionWindow);
        }
        if end_time - start_time < minimum_length_seconds {
            return Err(Error::InvalidAuctionWindow);
        }
        if start_price <= base_price {
            return Err(Error::InvalidPriceOrdering);
        }
        Ok(())
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl DutchAuctionMinter {
        /// Deploy the minter against an existing GenArtCore contract.
        #[ink(constructor)]
        pub fn new(core: AccountId) -> Self {
            Self {
                core,
                minimum_auction_length_seconds: DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS,
                auctions: Mapping::default(),
                settlement_in_progress: false,
            }
        }

        // =====================================================================
        // SETTLEMENT
        // =====================================================================

        /// Buy the next token of `project_id` for the caller at the current
        /// auction price.  Overpayment is refunded to the unit.
        #[ink(message, payable)]
        pub fn purchase(&mut self, project_id: ProjectId) -> Result<TokenId, Error> {
            let to = self.env().caller();
            self.purchase_to(to, project_id)
        }

        /// Like [`purchase`](Self::purchase), but the token is issued to
        /// `to` while the caller pays and receives any change.
        ///
        /// The settlement lock is taken at entry and released on every exit
        /// path; a nested call observes `ReentrantCall`, which in turn
        /// aborts the outer settlement during its refund step.
        #[ink(message, payable)]
        pub fn purchase_to(
            &mut self,
            to: AccountId,
            project_id: ProjectId,
        ) -> Result<TokenId, Error> {
            self.acquire_settlement_lock()?;
            let result = self.settle(to, project_id);
            self.release_settlement_lock();
            result
        }

        /// One settlement, all-or-nothing.  Ordering matters: the change is
        /// computed and returned only after issuance succeeded, so the payer
        /// is never paid out before the token debt is delivered.
        fn settle(&mut self, to: AccountId, project_id: ProjectId) -> Result<TokenId, Error> {
            // 1. admission — the core must confirm this minter's assignment
            let own_id = self.env().account_id();
            if !self.core_is_minter_approved(own_id, project_id)? {
                return Err(Error::NotAuthorizedMinter);
            }

            // 2. quote
            let record = self.auctions.get(project_id).unwrap_or_default();
            let price = purchase_price(&record, self.now_seconds())?;

            // 3. funds check
            let payment = self.env().transferred_value();
            if payment < price {
                return Err(Error::InsufficientPayment);
            }

            // resolve the payout target before mutating anything upstream
            let artist = self
                .core_project_artist(project_id)?
                .ok_or(Error::CoreCallFailed)?;

            // 4. issuance — the only point where invocations advance
            let token_id = self.core_record_purchase(project_id, to)?;

            // 5. change return
            let change = payment.checked_sub(price).ok_or(Error::Overflow)?;
            if change > 0 {
                let payer = self.env().caller();
                self.env()
                    .transfer(payer, change)
                    .map_err(|_| Error::RefundFailed)?;
            }

            // 6. remit the price to the artist; nothing stays behind
            if price > 0 {
                self.env()
                    .transfer(artist, price)
                    .map_err(|_| Error::ArtistPaymentFailed)?;
            }

            Ok(token_id)
        }

        // =====================================================================
        // AUCTION CONFIGURATION
        // =====================================================================

        /// Configure (or, once the window has passed, reconfigure) the
        /// auction for a project.
        ///
        /// **Caller:** the project's artist.
        ///
        /// # Errors
        /// - [`Error::LockedMidAuction`]     — the current auction is running.
        /// - [`Error::InvalidAuctionWindow`] — `end <= start` or window below
        ///   the process-wide minimum length.
        /// - [`Error::InvalidPriceOrdering`] — schedule would not descend.
        #[ink(message)]
        pub fn set_auction_details(
            &mut self,
            project_id: ProjectId,
            start_time: u64,
            end_time: u64,
            start_price: Balance,
            base_price: Balance,
        ) -> Result<(), Error> {
            self.require_artist(project_id)?;

            let existing = self.auctions.get(project_id).unwrap_or_default();
            if auction_is_live(&existing, self.now_seconds()) {
                return Err(Error::LockedMidAuction);
            }
            validate_auction_schedule(
                start_time,
                end_time,
                start_price,
                base_price,
                self.minimum_auction_length_seconds,
            )?;

            self.auctions.insert(
                project_id,
                &AuctionRecord {
                    start_time,
                    end_time,
                    start_price,
                    base_price,
                    configured: true,
                },
            );

            self.env().emit_event(SetAuctionDetails {
                project_id,
                start_time,
                end_time,
                start_price,
                base_price,
            });
            Ok(())
        }

        /// Clear a project's auction record, disabling sales until the
        /// artist configures a new schedule.  Also the only way to unlock a
        /// project whose auction is mid-flight.
        ///
        /// **Caller:** any whitelisted operator.  Never the artist — that
        /// would defeat the mid-auction lock.
        #[ink(message)]
        pub fn reset_auction_details(&mut self, project_id: ProjectId) -> Result<(), Error> {
            self.require_operator()?;
            self.auctions.insert(project_id, &AuctionRecord::default());
            self.env().emit_event(ResetAuctionDetails { project_id });
            Ok(())
        }

        /// Update the process-wide auction length floor.  Already-configured
        /// auctions are not revalidated.
        ///
        /// **Caller:** any whitelisted operator.
        #[ink(message)]
        pub fn set_minimum_auction_length_seconds(&mut self, seconds: u64) -> Result<(), Error> {
            self.require_operator()?;
            self.minimum_auction_length_seconds = seconds;
            self.env().emit_event(MinimumAuctionLengthSecondsUpdated {
                minimum_auction_length_seconds: seconds,
            });
            Ok(())
        }

        /// Present for interface uniformity with other minter variants;
        /// this minter never restricts third-party-recipient purchases, so
        /// the toggle is rejected for every caller and project.
        #[ink(message)]
        pub fn toggle_purchase_to_disabled(
            &mut self,
            _project_id: ProjectId,
        ) -> Result<(), Error> {
            Err(Error::ActionNotSupported)
        }

        // =====================================================================
        // VIEWS
        // =====================================================================

        /// Advisory price quote.  Unlike the purchase path this never fails
        /// on timing: before `start_time` it quotes `start_price`, and an
        /// unconfigured project reports `(false, 0)`.
        #[ink(message)]
        pub fn get_price_info(&self, project_id: ProjectId) -> Result<PriceInfo, Error> {
            let record = self.auctions.get(project_id).unwrap_or_default();
            let (is_configured, token_price) = if record.configured {
                (true, linear_price(&record, self.now_seconds())?)
            } else {
                (false, 0)
            };
            Ok(PriceInfo {
                is_configured,
                token_price,
                currency_symbol: String::from(CURRENCY_SYMBOL),
                currency_address: AccountId::from([0u8; 32]),
            })
        }

        /// Raw ledger entry; zeroed when the project was never configured.
        #[ink(message)]
        pub fn auction_details(&self, project_id: ProjectId) -> AuctionRecord {
            self.auctions.get(project_id).unwrap_or_default()
        }

        #[ink(message)]
        pub fn minimum_auction_length_seconds(&self) -> u64 {
            self.minimum_auction_length_seconds
        }

        /// Constantly `false` — see
        /// [`toggle_purchase_to_disabled`](Self::toggle_purchase_to_disabled).
        #[ink(message)]
        pub fn purchase_to_disabled(&self, _project_id: ProjectId) -> bool {
            false
        }

        #[ink(message)]
        pub fn core_contract(&self) -> AccountId {
            self.core
        }

        // =====================================================================
        // ACCESS CONTROL
        // =====================================================================

        fn require_artist(&self, project_id: ProjectId) -> Result<(), Error> {
            let artist = self.core_project_artist(project_id)?;
            if artist != Some(self.env().caller()) {
                return Err(Error::Unauthorized(Role::Artist));
            }
            Ok(())
        }

        fn require_operator(&self) -> Result<(), Error> {
            if !self.core_is_whitelisted(self.env().caller())? {
                return Err(Error::Unauthorized(Role::Operator));
            }
            Ok(())
        }

        // =====================================================================
        // REENTRANCY LOCK
        // =====================================================================

        fn acquire_settlement_lock(&mut self) -> Result<(), Error> {
            if self.settlement_in_progress {
                return Err(Error::ReentrantCall);
            }
            self.settlement_in_progress = true;
            Ok(())
        }

        fn release_settlement_lock(&mut self) {
            self.settlement_in_progress = false;
        }

        // =====================================================================
        // CORE CONTRACT CALLS
        // =====================================================================

        fn now_seconds(&self) -> u64 {
            self.env().block_timestamp() / MILLIS_PER_SECOND
        }

        fn core_is_minter_approved(
            &self,
            minter: AccountId,
            project_id: ProjectId,
        ) -> Result<bool, Error> {
            let result = build_call::<ink::env::DefaultEnvironment>()
                .call(self.core)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "is_minter_approved_for_project"
                    )))
                    .push_arg(minter)
                    .push_arg(project_id),
                )
                .returns::<bool>()
                .try_invoke();

            match result {
                Ok(Ok(approved)) => Ok(approved),
                _ => Err(Error::CoreCallFailed),
            }
        }

        fn core_project_artist(&self, project_id: ProjectId) -> Result<Option<AccountId>, Error> {
            let result = build_call::<ink::env::DefaultEnvironment>()
                .call(self.core)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!("project_artist")))
                        .push_arg(project_id),
                )
                .returns::<Option<AccountId>>()
                .try_invoke();

            match result {
                Ok(Ok(artist)) => Ok(artist),
                _ => Err(Error::CoreCallFailed),
            }
        }

        fn core_is_whitelisted(&self, account: AccountId) -> Result<bool, Error> {
            let result = build_call::<ink::env::DefaultEnvironment>()
                .call(self.core)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!("is_whitelisted")))
                        .push_arg(account),
                )
                .returns::<bool>()
                .try_invoke();

            match result {
                Ok(Ok(whitelisted)) => Ok(whitelisted),
                _ => Err(Error::CoreCallFailed),
            }
        }

        /// Issue a token through the core.  Any failure — transport, decode,
        /// or a rejection such as paused / sold out — aborts the purchase.
        fn core_record_purchase(
            &mut self,
            project_id: ProjectId,
            to: AccountId,
        ) -> Result<TokenId, Error> {
            let result = build_call::<ink::env::DefaultEnvironment>()
                .call(self.core)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!("record_purchase")))
                        .push_arg(project_id)
                        .push_arg(to),
                )
                .returns::<Result<TokenId, Error>>()
                .try_invoke();

            match result {
                Ok(Ok(Ok(token_id))) => Ok(token_id),
                _ => Err(Error::CoreCallFailed),
            }
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================
    //
    // The off-chain engine cannot dispatch cross-contract calls, so entry
    // points that consult the core at runtime are covered through the pure
    // internals they compose (pricing, schedule validation, the lock
    // predicate, the settlement lock).  Ledger-only messages are exercised
    // directly.

    #[cfg(test)]
    mod tests {
        use super::*;
        use ink::env::{test, DefaultEnvironment};

        type Env = DefaultEnvironment;

        fn accounts() -> test::DefaultAccounts<Env> {
            test::default_accounts::<Env>()
        }

        fn set_caller(addr: AccountId) {
            test::set_caller::<Env>(addr);
        }

        /// The ledger works in seconds; the env clock in milliseconds.
        fn set_now(seconds: u64) {
            test::set_block_timestamp::<Env>(seconds * MILLIS_PER_SECOND);
        }

        const ONE_QF: Balance = 1_000_000_000_000_000_000;
        const START_PRICE: Balance = ONE_QF; // 1.0
        const BASE_PRICE: Balance = ONE_QF / 20; // 0.05

        const PROJECT: ProjectId = 3;
        const T0: u64 = 1_000_000;
        const START: u64 = T0 + 3_600;
        const END: u64 = START + 7_200;

        /// charlie = mock core address; no cross-contract paths are taken.
        fn deploy() -> DutchAuctionMinter {
            set_caller(accounts().alice);
            set_now(T0);
            DutchAuctionMinter::new(accounts().charlie)
        }

        fn configured_record() -> AuctionRecord {
            AuctionRecord {
                start_time: START,
                end_time: END,
                start_price: START_PRICE,
                base_price: BASE_PRICE,
                configured: true,
            }
        }

        fn deploy_with_auction() -> DutchAuctionMinter {
            let mut minter = deploy();
            minter.auctions.insert(PROJECT, &configured_record());
            minter
        }

        // ── Constructor & views ──────────────────────────────────────────────

        #[ink::test]
        fn constructor_defaults() {
            let minter = deploy();
            assert_eq!(minter.core_contract(), accounts().charlie);
            assert_eq!(
                minter.minimum_auction_length_seconds(),
                DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS
            );
            assert!(!minter.settlement_in_progress);
            assert!(!minter.purchase_to_disabled(PROJECT));
            assert_eq!(minter.auction_details(PROJECT), AuctionRecord::default());
        }

        // ── Pricing engine ───────────────────────────────────────────────────

        #[ink::test]
        fn price_at_start_equals_start_price() {
            let record = configured_record();
            assert_eq!(linear_price(&record, START), Ok(START_PRICE));
        }

        #[ink::test]
        fn price_at_and_after_end_equals_base_price() {
            let record = configured_record();
            assert_eq!(linear_price(&record, END), Ok(BASE_PRICE));
            assert_eq!(linear_price(&record, END + 1), Ok(BASE_PRICE));
            assert_eq!(linear_price(&record, END + 365 * 24 * 3_600), Ok(BASE_PRICE));
        }

        #[ink::test]
        fn price_at_midpoint() {
            let record = configured_record();
            // 1.0 - 0.95 / 2 = 0.525
            let expected = START_PRICE - (START_PRICE - BASE_PRICE) / 2;
            assert_eq!(linear_price(&record, START + 3_600), Ok(expected));
        }

        #[ink::test]
        fn price_matches_worked_example() {
            // start 1.0, base 0.05, 7200 s window, quoted 3840 s in:
            // 1.0 - 0.95 * 3840 / 7200, floored
            let record = configured_record();
            let decay = (START_PRICE - BASE_PRICE) * 3_840 / 7_200;
            assert_eq!(decay, 506_666_666_666_666_666);
            assert_eq!(
                linear_price(&record, START + 3_840),
                Ok(493_333_333_333_333_334)
            );
        }

        #[ink::test]
        fn price_stays_within_bounds_and_never_increases() {
            let record = configured_record();
            let mut previous = START_PRICE;
            let mut now = START;
            while now <= END {
                let price = linear_price(&record, now).unwrap();
                assert!(price <= START_PRICE);
                assert!(price >= BASE_PRICE);
                assert!(price <= previous);
                previous = price;
                now += 480;
            }
        }

        #[ink::test]
        fn price_division_truncates_toward_zero() {
            let record = AuctionRecord {
                start_time: 0,
                end_time: 3,
                start_price: 10,
                base_price: 0,
                configured: true,
            };
            // 10 - 10 * 1 / 3 = 10 - 3 (floored)
            assert_eq!(linear_price(&record, 1), Ok(7));
            assert_eq!(linear_price(&record, 2), Ok(4));
        }

        #[ink::test]
        fn price_decay_overflow_is_reported() {
            let record = AuctionRecord {
                start_time: 0,
                end_time: 1_000,
                start_price: Balance::MAX,
                base_price: 0,
                configured: true,
            };
            assert_eq!(linear_price(&record, 500), Err(Error::Overflow));
        }

        #[ink::test]
        fn purchase_price_rejects_unconfigured() {
            let record = AuctionRecord::default();
            assert_eq!(
                purchase_price(&record, START),
                Err(Error::AuctionNotConfigured)
            );
        }

        #[ink::test]
        fn purchase_price_rejects_before_start() {
            let record = configured_record();
            assert_eq!(
                purchase_price(&record, START - 1),
                Err(Error::AuctionNotStarted)
            );
            // at the exact start instant the sale is open
            assert_eq!(purchase_price(&record, START), Ok(START_PRICE));
        }

        // ── Advisory quote ───────────────────────────────────────────────────

        #[ink::test]
        fn quote_unconfigured_project() {
            let minter = deploy();
            let info = minter.get_price_info(PROJECT).unwrap();
            assert!(!info.is_configured);
            assert_eq!(info.token_price, 0);
            assert_eq!(info.currency_symbol, "QF");
            assert_eq!(info.currency_address, AccountId::from([0u8; 32]));
        }

        #[ink::test]
        fn quote_before_start_reports_start_price() {
            // the quote path tolerates pre-start; only purchases reject it
            let minter = deploy_with_auction();
            set_now(START - 600);
            let info = minter.get_price_info(PROJECT).unwrap();
            assert!(info.is_configured);
            assert_eq!(info.token_price, START_PRICE);
        }

        #[ink::test]
        fn quote_tracks_the_curve() {
            let minter = deploy_with_auction();
            set_now(START + 3_840);
            let info = minter.get_price_info(PROJECT).unwrap();
            assert_eq!(info.token_price, 493_333_333_333_333_334);

            set_now(END + 52);
            let info = minter.get_price_info(PROJECT).unwrap();
            assert_eq!(info.token_price, BASE_PRICE);
        }

        // ── Schedule validation ──────────────────────────────────────────────

        #[ink::test]
        fn schedule_rejects_inverted_window() {
            let min = DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS;
            assert_eq!(
                validate_auction_schedule(END, START, START_PRICE, BASE_PRICE, min),
                Err(Error::InvalidAuctionWindow)
            );
            assert_eq!(
                validate_auction_schedule(START, START, START_PRICE, BASE_PRICE, min),
                Err(Error::InvalidAuctionWindow)
            );
        }

        #[ink::test]
        fn schedule_enforces_minimum_length() {
            let min = DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS;
            assert_eq!(
                validate_auction_schedule(START, START + min - 1, START_PRICE, BASE_PRICE, min),
                Err(Error::InvalidAuctionWindow)
            );
            // exactly the minimum is allowed
            assert_eq!(
                validate_auction_schedule(START, START + min, START_PRICE, BASE_PRICE, min),
                Ok(())
            );
        }

        #[ink::test]
        fn schedule_requires_descending_prices() {
            let min = DEFAULT_MINIMUM_AUCTION_LENGTH_SECONDS;
            assert_eq!(
                validate_auction_schedule(START, END, BASE_PRICE, START_PRICE, min),
                Err(Error::InvalidPriceOrdering)
            );
            assert_eq!(
                validate_auction_schedule(START, END, START_PRICE, START_PRICE, min),
                Err(Error::InvalidPriceOrdering)
            );
        }

        // ── Mid-auction lock ─────────────────────────────────────────────────

        #[ink::test]
        fn lock_covers_exactly_the_sale_window() {
            let record = configured_record();
            assert!(!auction_is_live(&record, START - 1));
            assert!(auction_is_live(&record, START));
            assert!(auction_is_live(&record, END - 1));
            assert!(!auction_is_live(&record, END));
            assert!(!auction_is_live(&record, END + 1));
        }

        #[ink::test]
        fn lock_ignores_unconfigured_records() {
            let record = AuctionRecord {
                configured: false,
                ..configured_record()
            };
            assert!(!auction_is_live(&record, START + 1));
        }

        #[ink::test]
        fn reset_clears_the_lock() {
            let mut minter = deploy_with_auction();
            let now = START + 60;
            assert!(auction_is_live(&minter.auction_details(PROJECT), now));
            // what reset_auction_details writes after its operator check
            minter.auctions.insert(PROJECT, &AuctionRecord::default());
            let cleared = minter.auction_details(PROJECT);
            assert!(!auction_is_live(&cleared, now));
            assert!(!cleared.configured);
            assert_eq!(cleared.start_price, 0);
        }

        // ── Settlement lock ──────────────────────────────────────────────────

        #[ink::test]
        fn settlement_lock_is_exclusive() {
            let mut minter = deploy();
            assert_eq!(minter.acquire_settlement_lock(), Ok(()));
            assert_eq!(minter.acquire_settlement_lock(), Err(Error::ReentrantCall));
            minter.release_settlement_lock();
            assert_eq!(minter.acquire_settlement_lock(), Ok(()));
        }

        // ── Change computation ───────────────────────────────────────────────

        #[ink::test]
        fn change_is_exact_to_the_unit() {
            let price: Balance = 493_333_333_333_333_334;
            let payment: Balance = ONE_QF;
            assert_eq!(payment.checked_sub(price), Some(506_666_666_666_666_666));
        }

        // ── Unsupported toggle ───────────────────────────────────────────────

        #[ink::test]
        fn toggle_purchase_to_disabled_always_fails() {
            let mut minter = deploy_with_auction();
            for caller in [accounts().alice, accounts().bob, accounts().eve] {
                set_caller(caller);
                assert_eq!(
                    minter.toggle_purchase_to_disabled(PROJECT),
                    Err(Error::ActionNotSupported)
                );
            }
            // unconfigured projects are rejected all the same
            assert_eq!(
                minter.toggle_purchase_to_disabled(99),
                Err(Error::ActionNotSupported)
            );
        }
    }
}
