#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # Gallery Protocol — Generative Art Core
///
/// **Role:** Ground-truth catalog of generative-art projects, operator
/// whitelist, and token ledger.  Minter contracts never touch token state
/// directly: they are assigned per project by a whitelisted operator and
/// issue tokens exclusively through `record_purchase`.
///
/// **Architecture:**
/// ```text
///   [collector] ──purchase()──► [minter contract]
///                                      │
///                    record_purchase() XCC (assigned minter only)
///                                      ▼
///                               [GenArtCore] ──Mint event──► indexers
/// ```
///
/// Token numbering follows the `project_id * 1_000_000 + invocation`
/// convention, so a token id encodes both its project and its position in
/// the edition.
#[ink::contract]
mod gen_art_core {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    pub type ProjectId = u64;
    pub type TokenId = u64;

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    /// Token-id namespace per project and the hard ceiling on edition size.
    pub const ONE_MILLION: u64 = 1_000_000;

    // =========================================================================
    // STORAGE
    // =========================================================================

    /// Per-project record.  New projects start paused and inactive so the
    /// artist and an operator must both act before anything can be sold.
    #[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub struct Project {
        pub name: String,
        pub artist: AccountId,
        pub invocations: u64,
        pub max_invocations: u64,
        pub active: bool,
        pub paused: bool,
    }

    #[ink(storage)]
    pub struct GenArtCore {
        /// Deployer.  The only account that may edit the operator whitelist.
        admin: AccountId,

        /// Operator whitelist.  Whitelisted accounts administer projects and
        /// minter assignments, and hold the Operator role on minters.
        whitelisted: Mapping<AccountId, bool>,

        // ── Catalog ───────────────────────────────────────────────────────
        projects: Mapping<ProjectId, Project>,
        next_project_id: ProjectId,

        /// Per-project minter assignment.  `record_purchase` only accepts
        /// calls from the assigned minter.
        minter_for_project: Mapping<ProjectId, AccountId>,

        // ── Token ledger ──────────────────────────────────────────────────
        token_owner: Mapping<TokenId, AccountId>,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Emitted once per issued token.  The only place invocation counters
    /// advance.
    #[ink(event)]
    pub struct Mint {
        #[ink(topic)]
        to: AccountId,
        #[ink(topic)]
        token_id: TokenId,
        project_id: ProjectId,
    }

    #[ink(event)]
    pub struct ProjectAdded {
        #[ink(topic)]
        project_id: ProjectId,
        artist: AccountId,
    }

    #[ink(event)]
    pub struct ProjectArtistUpdated {
        #[ink(topic)]
        project_id: ProjectId,
        artist: AccountId,
    }

    #[ink(event)]
    pub struct WhitelistUpdated {
        #[ink(topic)]
        account: AccountId,
        whitelisted: bool,
    }

    /// `minter = None` means the project currently has no assigned minter
    /// and cannot sell.
    #[ink(event)]
    pub struct MinterForProjectUpdated {
        #[ink(topic)]
        project_id: ProjectId,
        minter: Option<AccountId>,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the contract admin.
        OnlyAdmin,
        /// Caller is not on the operator whitelist.
        OnlyWhitelisted,
        /// Caller is not the artist of the project.
        OnlyArtist,
        /// No project exists under this id.
        NonexistentProject,
        /// Caller is not the minter assigned to the project.
        NotAssignedMinter,
        /// Project has not been activated by an operator.
        ProjectInactive,
        /// Project sales are paused by the artist.
        ProjectPaused,
        /// Edition is fully minted.
        MaxInvocationsReached,
        /// Requested max invocations is below current invocations or above
        /// the one-million ceiling.
        InvalidMaxInvocations,
        /// An arithmetic operation overflowed.
        Overflow,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl GenArtCore {
        /// Deploy the core.  The deployer becomes admin and is whitelisted.
        #[ink(constructor)]
        pub fn new() -> Self {
            let caller = Self::env().caller();
            let mut whitelisted = Mapping::default();
            whitelisted.insert(caller, &true);

            Self::env().emit_event(WhitelistUpdated {
                account: caller,
                whitelisted: true,
            });

            Self {
                admin: caller,
                whitelisted,
                projects: Mapping::default(),
                next_project_id: 0,
                minter_for_project: Mapping::default(),
                token_owner: Mapping::default(),
            }
        }

        // =====================================================================
        // OPERATOR WHITELIST
        // =====================================================================

        #[ink(message)]
        pub fn add_whitelisted(&mut self, account: AccountId) -> Result<(), Error> {
            self.only_admin()?;
            self.whitelisted.insert(account, &true);
            self.env().emit_event(WhitelistUpdated {
                account,
                whitelisted: true,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn remove_whitelisted(&mut self, account: AccountId) -> Result<(), Error> {
            self.only_admin()?;
            self.whitelisted.insert(account, &false);
            self.env().emit_event(WhitelistUpdated {
                account,
                whitelisted: false,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn is_whitelisted(&self, account: AccountId) -> bool {
            self.whitelisted.get(account).unwrap_or(false)
        }

        // =====================================================================
        // PROJECT CATALOG
        // =====================================================================

        /// Register a new project.  Starts paused, inactive, and with the
        /// maximum possible edition size; the artist trims it later.
        #[ink(message)]
        pub fn add_project(&mut self, name: String, artist: AccountId) -> Result<ProjectId, Error> {
            self.only_whitelisted()?;

            let project_id = self.next_project_id;
            self.next_project_id = project_id.checked_add(1).ok_or(Error::Overflow)?;

            self.projects.insert(
                project_id,
                &Project {
                    name,
                    artist,
                    invocations: 0,
                    max_invocations: ONE_MILLION,
                    active: false,
                    paused: true,
                },
            );

            self.env().emit_event(ProjectAdded { project_id, artist });
            Ok(project_id)
        }

        #[ink(message)]
        pub fn toggle_project_is_active(&mut self, project_id: ProjectId) -> Result<(), Error> {
            self.only_whitelisted()?;
            let mut project = self.project(project_id)?;
            project.active = !project.active;
            self.projects.insert(project_id, &project);
            Ok(())
        }

        #[ink(message)]
        pub fn toggle_project_is_paused(&mut self, project_id: ProjectId) -> Result<(), Error> {
            let mut project = self.project(project_id)?;
            if self.env().caller() != project.artist {
                return Err(Error::OnlyArtist);
            }
            project.paused = !project.paused;
            self.projects.insert(project_id, &project);
            Ok(())
        }

        /// Artist-set edition size.  May never drop below what has already
        /// been minted, nor exceed the token-id namespace.
        #[ink(message)]
        pub fn update_project_max_invocations(
            &mut self,
            project_id: ProjectId,
            max_invocations: u64,
        ) -> Result<(), Error> {
            let mut project = self.project(project_id)?;
            if self.env().caller() != project.artist {
                return Err(Error::OnlyArtist);
            }
            if max_invocations < project.invocations || max_invocations > ONE_MILLION {
                return Err(Error::InvalidMaxInvocations);
            }
            project.max_invocations = max_invocations;
            self.projects.insert(project_id, &project);
            Ok(())
        }

        /// Reassign the project to a new artist address.  Allowed to the
        /// current artist or any whitelisted operator.
        #[ink(message)]
        pub fn update_project_artist(
            &mut self,
            project_id: ProjectId,
            artist: AccountId,
        ) -> Result<(), Error> {
            let mut project = self.project(project_id)?;
            let caller = self.env().caller();
            if caller != project.artist && !self.is_whitelisted(caller) {
                return Err(Error::OnlyArtist);
            }
            project.artist = artist;
            self.projects.insert(project_id, &project);
            self.env().emit_event(ProjectArtistUpdated { project_id, artist });
            Ok(())
        }

        #[ink(message)]
        pub fn project_artist(&self, project_id: ProjectId) -> Option<AccountId> {
            self.projects.get(project_id).map(|p| p.artist)
        }

        #[ink(message)]
        pub fn project_invocation_state(&self, project_id: ProjectId) -> (u64, u64) {
            match self.projects.get(project_id) {
                Some(p) => (p.invocations, p.max_invocations),
                None => (0, 0),
            }
        }

        #[ink(message)]
        pub fn project_name(&self, project_id: ProjectId) -> Option<String> {
            self.projects.get(project_id).map(|p| p.name)
        }

        #[ink(message)]
        pub fn next_project_id(&self) -> ProjectId {
            self.next_project_id
        }

        // =====================================================================
        // MINTER ASSIGNMENT & ISSUANCE
        // =====================================================================

        #[ink(message)]
        pub fn set_minter_for_project(
            &mut self,
            project_id: ProjectId,
            minter: AccountId,
        ) -> Result<(), Error> {
            self.only_whitelisted()?;
            self.project(project_id)?;
            self.minter_for_project.insert(project_id, &minter);
            self.env().emit_event(MinterForProjectUpdated {
                project_id,
                minter: Some(minter),
            });
            Ok(())
        }

        #[ink(message)]
        pub fn clear_minter_for_project(&mut self, project_id: ProjectId) -> Result<(), Error> {
            self.only_whitelisted()?;
            self.minter_for_project.remove(project_id);
            self.env().emit_event(MinterForProjectUpdated {
                project_id,
                minter: None,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn is_minter_approved_for_project(
            &self,
            minter: AccountId,
            project_id: ProjectId,
        ) -> bool {
            self.minter_for_project.get(project_id) == Some(minter)
        }

        /// Issue the next token of a project to `to`.
        ///
        /// **Caller:** the assigned minter contract only.
        ///
        /// Fails when the project is unknown, inactive, paused, or fully
        /// minted.  On success the invocation counter advances by exactly
        /// one and a [`Mint`] event is emitted.
        #[ink(message)]
        pub fn record_purchase(
            &mut self,
            project_id: ProjectId,
            to: AccountId,
        ) -> Result<TokenId, Error> {
            let caller = self.env().caller();
            if self.minter_for_project.get(project_id) != Some(caller) {
                return Err(Error::NotAssignedMinter);
            }

            let mut project = self.project(project_id)?;
            if !project.active {
                return Err(Error::ProjectInactive);
            }
            if project.paused {
                return Err(Error::ProjectPaused);
            }
            if project.invocations >= project.max_invocations {
                return Err(Error::MaxInvocationsReached);
            }

            let invocation = project.invocations;
            project.invocations = invocation.checked_add(1).ok_or(Error::Overflow)?;
            self.projects.insert(project_id, &project);

            let token_id = project_id
                .checked_mul(ONE_MILLION)
                .ok_or(Error::Overflow)?
                .checked_add(invocation)
                .ok_or(Error::Overflow)?;
            self.token_owner.insert(token_id, &to);

            self.env().emit_event(Mint {
                to,
                token_id,
                project_id,
            });

            Ok(token_id)
        }

        #[ink(message)]
        pub fn owner_of(&self, token_id: TokenId) -> Option<AccountId> {
            self.token_owner.get(token_id)
        }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        fn project(&self, project_id: ProjectId) -> Result<Project, Error> {
            self.projects.get(project_id).ok_or(Error::NonexistentProject)
        }

        fn only_admin(&self) -> Result<(), Error> {
            if self.env().caller() != self.admin {
                return Err(Error::OnlyAdmin);
            }
            Ok(())
        }

        fn only_whitelisted(&self) -> Result<(), Error> {
            if !self.is_whitelisted(self.env().caller()) {
                return Err(Error::OnlyWhitelisted);
            }
            Ok(())
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
