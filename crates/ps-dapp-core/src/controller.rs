use alloy_primitives::Address;
use ps_api_types::{AdopterTable, AdoptionStatus, ChainId, PetId, TransactionReceipt, short_address};
use ps_chain_adoption::AdoptionContract;
use ps_chain_client::{self as client, Eip1193Provider, ProviderError};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use crate::catalog::{self, render_catalog};
use crate::config::DappConfig;
use crate::error::{AdoptError, ConnectError};
use crate::view::{
    ADOPT_LABEL, ADOPTED_LABEL, AdoptionView, CONNECT_LABEL, CONNECTED_LABEL, JUST_ADOPTED_LABEL,
    PROCESSING_LABEL,
};

const MISSING_PROVIDER_MESSAGE: &str =
    "MetaMask or a compatible Ethereum wallet is required to use this decentralized application!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletSession {
    pub account: Address,
    pub chain_id: ChainId,
}

/// Tells the user once that no wallet was found and disables connecting.
pub fn report_missing_provider<V: AdoptionView + ?Sized>(view: &V) {
    warn!("no injected wallet provider detected");
    view.alert(MISSING_PROVIDER_MESSAGE);
    view.set_connect_button(CONNECT_LABEL, false);
}

/// Drives the page from wallet and contract state.
///
/// State lives in `RefCell`s; no borrow is held across an `.await`, so
/// provider notifications may interleave with in-flight requests.
pub struct AdoptionController<P, V> {
    provider: P,
    view: V,
    config: DappConfig,
    session: RefCell<Option<WalletSession>>,
    contract: RefCell<Option<Rc<AdoptionContract<P>>>>,
    adopters: RefCell<AdopterTable>,
    /// Pets whose adoption transaction has been sent but not yet settled.
    pending: RefCell<HashSet<PetId>>,
}

impl<P, V> AdoptionController<P, V>
where
    P: Eip1193Provider + Clone,
    V: AdoptionView,
{
    pub fn new(provider: P, view: V, config: DappConfig) -> Self {
        Self {
            provider,
            view,
            config,
            session: RefCell::new(None),
            contract: RefCell::new(None),
            adopters: RefCell::new(AdopterTable::default()),
            pending: RefCell::new(HashSet::new()),
        }
    }

    pub fn session(&self) -> Option<WalletSession> {
        *self.session.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn has_contract(&self) -> bool {
        self.contract.borrow().is_some()
    }

    pub fn adopters(&self) -> AdopterTable {
        self.adopters.borrow().clone()
    }

    pub fn render_catalog(&self) {
        render_catalog(&self.view);
        self.reconcile();
    }

    /// Runs the connect flow, reporting any failure to the user. The connect
    /// button stays disabled until the flow settles.
    pub async fn connect_wallet(&self) -> Result<WalletSession, ConnectError> {
        self.view.set_connect_button(CONNECT_LABEL, false);
        match self.try_connect().await {
            Ok(session) => Ok(session),
            Err(err) => {
                self.view.set_connect_button(CONNECT_LABEL, true);
                match &err {
                    ConnectError::Cancelled | ConnectError::SwitchDeclined => {
                        info!(%err, "wallet connection abandoned")
                    }
                    _ => error!(%err, "wallet connection failed"),
                }
                self.view
                    .alert(&err.user_message(&self.config.network.chain_name));
                Err(err)
            }
        }
    }

    async fn try_connect(&self) -> Result<WalletSession, ConnectError> {
        let accounts = client::request_accounts(&self.provider)
            .await
            .map_err(|err| {
                if err.is_user_rejection() {
                    ConnectError::Cancelled
                } else {
                    ConnectError::Provider(err)
                }
            })?;
        let account = accounts.first().copied().ok_or(ConnectError::NoAccounts)?;

        let network = &self.config.network;
        // An unreadable chain id is treated as being on the wrong network.
        let current = match client::chain_id(&self.provider).await {
            Ok(chain_id) => Some(chain_id),
            Err(err) => {
                warn!(%err, "could not read the wallet network");
                None
            }
        };
        if current != Some(network.chain_id) {
            info!(current = ?current, target = %network.chain_id, "wallet is on another network");
            let prompt = format!(
                "The dApp is configured for the {}. \
                 Click OK to prompt an automatic switch in your wallet.",
                network.chain_name
            );
            if !self.view.confirm(&prompt) {
                return Err(ConnectError::SwitchDeclined);
            }
            self.ensure_network()
                .await
                .map_err(ConnectError::SwitchFailed)?;
            self.provider.wait(self.config.network_settle_ms).await;
        }
        let chain_id = network.chain_id;

        let contract = AdoptionContract::new(
            self.provider.clone(),
            self.config.contract_address,
            self.config.receipt_polling(),
        );
        *self.contract.borrow_mut() = Some(Rc::new(contract));
        let session = WalletSession { account, chain_id };
        *self.session.borrow_mut() = Some(session);

        self.show_session(&session);
        self.view.set_connect_button(CONNECTED_LABEL, false);
        info!(%account, %chain_id, "wallet connected");

        self.refresh_statuses().await;
        Ok(session)
    }

    /// Switches the wallet to the target network, adding it first when the
    /// wallet does not know it.
    async fn ensure_network(&self) -> Result<(), ProviderError> {
        let network = &self.config.network;
        match client::switch_chain(&self.provider, &network.switch_parameter()).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_unrecognized_chain() => {
                debug!("target network unknown to wallet, adding it");
                client::add_chain(&self.provider, &network.add_parameter())
                    .await
                    .inspect_err(|err| error!(%err, "failed to add network definition"))
            }
            Err(err) => {
                error!(%err, "network switch failed");
                Err(err)
            }
        }
    }

    fn show_session(&self, session: &WalletSession) {
        self.view.show_account(Some(&format!(
            "Active Wallet: {} ({})",
            short_address(&session.account.to_string()),
            self.config.network.chain_name
        )));
    }

    /// Re-reads every adoption slot and redraws the cards.
    pub async fn refresh_statuses(&self) {
        let Some(contract) = self.contract.borrow().clone() else {
            warn!("contract binding not initialized, skipping status refresh");
            return;
        };

        let fresh = match contract.get_adopters().await {
            Ok(slots) => AdopterTable::normalize(slots),
            Err(err) => {
                warn!(%err, "batch adopter read failed, falling back to per-slot reads");
                Self::read_slots(&contract).await
            }
        };

        // A chain change while reading replaces or drops the binding; the
        // result then belongs to a dead session.
        let still_current = self
            .contract
            .borrow()
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(current, &contract));
        if !still_current {
            debug!("discarding adopter read from an invalidated session");
            return;
        }

        debug!(claimed = fresh.claimed_count(), "adopter table refreshed");
        self.adopters.borrow_mut().merge(&fresh);
        self.reconcile();
    }

    async fn read_slots(contract: &AdoptionContract<P>) -> AdopterTable {
        let mut slots = Vec::with_capacity(ps_api_types::PET_COUNT);
        for pet in PetId::all() {
            let adopter = match contract.adopters(pet).await {
                Ok(adopter) => adopter,
                Err(err) => {
                    error!(%err, pet = pet.index(), "adopter slot read failed");
                    Address::ZERO
                }
            };
            slots.push(adopter);
        }
        AdopterTable::normalize(slots)
    }

    fn reconcile(&self) {
        let connected = self.is_connected();
        let table = self.adopters.borrow().clone();
        let pending = self.pending.borrow().clone();
        for (pet, status) in table.iter() {
            match status {
                AdoptionStatus::Claimed(adopter) => {
                    self.view.set_adopter_info(pet, Some(adopter));
                    self.view.set_adopt_button(pet, ADOPTED_LABEL, false);
                }
                AdoptionStatus::Unclaimed if pending.contains(&pet) => {
                    self.view.set_adopter_info(pet, None);
                    self.view.set_adopt_button(pet, PROCESSING_LABEL, false);
                }
                AdoptionStatus::Unclaimed => {
                    self.view.set_adopter_info(pet, None);
                    self.view.set_adopt_button(pet, ADOPT_LABEL, connected);
                }
            }
        }
    }

    /// Adopts the pet at `index` for the connected account.
    pub async fn submit_adoption(&self, index: usize) -> Result<TransactionReceipt, AdoptError> {
        let result = self.try_adopt(index).await;
        if let Err(err) = &result {
            self.view.alert(&err.user_message());
        }
        result
    }

    async fn try_adopt(&self, index: usize) -> Result<TransactionReceipt, AdoptError> {
        let pet = PetId::new(index)?;
        let session = self.session().ok_or(AdoptError::NotConnected)?;
        let contract = self
            .contract
            .borrow()
            .clone()
            .ok_or(AdoptError::NotConnected)?;
        if self.adopters.borrow().status(pet).is_claimed() {
            return Err(AdoptError::AlreadyAdopted(pet));
        }
        if !self.pending.borrow_mut().insert(pet) {
            return Err(AdoptError::InProgress(pet));
        }

        self.view.set_adopt_button(pet, PROCESSING_LABEL, false);
        let outcome = contract
            .adopt(pet, session.account, self.config.gas_limit)
            .await;
        self.pending.borrow_mut().remove(&pet);

        match outcome {
            Ok(receipt) => {
                let name = catalog::pet(pet).name;
                let tx_hash = receipt.transaction_hash;
                info!(pet = pet.index(), name, %tx_hash, "adoption confirmed");
                self.adopters
                    .borrow_mut()
                    .record_claim(pet, session.account);
                self.view.set_adopt_button(pet, JUST_ADOPTED_LABEL, false);
                self.view.set_adopter_info(pet, Some(session.account));
                self.view.alert(&format!(
                    "Adoption transaction confirmed! You are the new owner of {name}."
                ));
                self.refresh_statuses().await;
                Ok(receipt)
            }
            Err(err) => {
                let err = AdoptError::from(err);
                error!(%err, pet = pet.index(), category = ?err.category(), "adoption failed");
                self.view
                    .set_adopt_button(pet, ADOPT_LABEL, self.is_connected());
                Err(err)
            }
        }
    }

    /// `chainChanged`: whatever the new chain is, the session and binding
    /// belong to the old one.
    pub fn on_chain_changed(&self, chain_id: Option<ChainId>) {
        info!(chain_id = ?chain_id, "wallet network changed, session cleared");
        self.adopters.borrow_mut().clear();
        self.invalidate();
    }

    /// `accountsChanged`: an empty list means the wallet disconnected us.
    pub async fn on_accounts_changed(&self, accounts: Vec<Address>) {
        let Some(account) = accounts.first().copied() else {
            info!("wallet disconnected");
            self.invalidate();
            return;
        };

        let session = {
            let mut current = self.session.borrow_mut();
            let Some(session) = current.as_mut() else {
                debug!(%account, "account change before connecting, ignored");
                return;
            };
            session.account = account;
            *session
        };
        info!(%account, "active account changed");
        self.show_session(&session);
        self.refresh_statuses().await;
    }

    fn invalidate(&self) {
        self.session.borrow_mut().take();
        self.contract.borrow_mut().take();
        self.view.show_account(None);
        self.view.set_connect_button(CONNECT_LABEL, true);
        self.reconcile();
    }
}
