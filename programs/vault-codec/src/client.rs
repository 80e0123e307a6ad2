//! Vault Client
//!
//! Ties the address resolver, payload builder and state decoder to a
//! ledger. The ledger itself (RPC, an in-process bank, a test double) is
//! behind [`LedgerClient`]; this module never signs, retries or waits.
//!
//! ```ignore
//! let mut client = VaultClient::new(ledger, VaultConfig::default());
//! let vault = client.deposit(&owner, 460_000_000)?;
//! let config = client.fetch_config()?;
//! ```

use crate::{
    config::VaultConfig,
    decoder::decode,
    error::{CodecError, ProgramFailure},
    instruction::{
        self, EscrowMakeAccounts, EscrowSettleAccounts, InitConfigAccounts, TokenTransferAccounts,
        UpdateConfigArgs,
    },
    pda,
    schema::{FieldSchema, Record},
    state::{ConfigAccount, Escrow, Pack, Status, MINT_SLOTS},
};
use solana_program::{instruction::Instruction, msg, pubkey::Pubkey};
use thiserror::Error;

// =============================================================================
// LEDGER INTERFACE
// =============================================================================

/// Transport to a Solana ledger.
///
/// Calls are synchronous; latency, retries and timeouts are the
/// implementor's concern.
pub trait LedgerClient {
    type Error: std::error::Error + 'static;

    /// Sign, send and confirm a single instruction.
    fn submit_instruction(&mut self, instruction: Instruction) -> Result<(), Self::Error>;

    /// Raw data of an account, `None` if it does not exist.
    fn fetch_account_bytes(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Ledger clock, unix seconds.
    fn current_timestamp(&self) -> Result<u32, Self::Error>;

    /// Custom code carried by a rejected instruction, if the error has one.
    fn custom_code(_error: &Self::Error) -> Option<u32> {
        None
    }
}

/// Errors returned by [`VaultClient`].
#[derive(Error, Debug)]
pub enum ClientError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("ledger error: {0}")]
    Ledger(#[source] E),

    /// The vault program rejected the instruction with one of its own codes.
    #[error("program failure {}: {0}", .0.name())]
    Program(ProgramFailure),

    #[error("account {0} does not exist")]
    AccountNotFound(Pubkey),
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Settings written by `InitConfig`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigInit {
    pub mints: [Pubkey; MINT_SLOTS],
    pub owner: Pubkey,
    pub admin: Pubkey,
    pub is_authorized: bool,
    pub status: Status,
    pub fee: u64,
    pub label: String,
}

/// Terms of a new escrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscrowOffer {
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub decimals_x: u8,
    pub amount_x: u64,
    pub decimals_y: u8,
    pub amount_y: u64,
    pub id: u64,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct VaultClient<L: LedgerClient> {
    ledger: L,
    config: VaultConfig,
}

type ClientResult<T, L> = Result<T, ClientError<<L as LedgerClient>::Error>>;

impl<L: LedgerClient> VaultClient<L> {
    pub fn new(ledger: L, config: VaultConfig) -> Self {
        Self { ledger, config }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn into_inner(self) -> L {
        self.ledger
    }

    fn submit(&mut self, instruction: Instruction) -> ClientResult<(), L> {
        msg!(
            "Submitting instruction {} to {}",
            instruction.data.first().copied().unwrap_or_default(),
            instruction.program_id
        );
        self.ledger.submit_instruction(instruction).map_err(|e| {
            match L::custom_code(&e).and_then(|code| ProgramFailure::try_from(code).ok()) {
                Some(failure) => ClientError::Program(failure),
                None => ClientError::Ledger(e),
            }
        })
    }

    fn fetch(&self, address: &Pubkey) -> ClientResult<Vec<u8>, L> {
        msg!("Fetching account {}", address);
        self.ledger
            .fetch_account_bytes(address)
            .map_err(ClientError::Ledger)?
            .ok_or(ClientError::AccountNotFound(*address))
    }

    // =========================================================================
    // LAMPORT VAULT
    // =========================================================================

    /// Deposit lamports into `owner`'s vault. Returns the vault address.
    pub fn deposit(&mut self, owner: &Pubkey, amount: u64) -> ClientResult<Pubkey, L> {
        let program_id = self.config.program_id;
        let (vault, _) = pda::vault_address(&program_id, owner)?;
        self.submit(instruction::deposit(&program_id, owner, &vault, amount)?)?;
        Ok(vault)
    }

    pub fn withdraw(&mut self, owner: &Pubkey, amount: u64) -> ClientResult<Pubkey, L> {
        let program_id = self.config.program_id;
        let (vault, _) = pda::vault_address(&program_id, owner)?;
        self.submit(instruction::withdraw(&program_id, owner, &vault, amount)?)?;
        Ok(vault)
    }

    // =========================================================================
    // TOKENS
    // =========================================================================

    fn token_accounts(
        &self,
        authority: &Pubkey,
        wallet: &Pubkey,
        mint: &Pubkey,
        token_program: &Pubkey,
    ) -> Result<TokenTransferAccounts, CodecError> {
        Ok(TokenTransferAccounts {
            authority: *authority,
            from_ata: pda::derive_associated_address(authority, mint, token_program)?,
            to_ata: pda::derive_associated_address(wallet, mint, token_program)?,
            wallet: *wallet,
            mint: *mint,
            token_program: *token_program,
        })
    }

    /// Move tokens from `authority`'s ATA to `to_wallet`'s ATA.
    pub fn token_deposit(
        &mut self,
        authority: &Pubkey,
        to_wallet: &Pubkey,
        mint: &Pubkey,
        token_program: &Pubkey,
        decimals: u8,
        amount: u64,
    ) -> ClientResult<(), L> {
        let accounts = self.token_accounts(authority, to_wallet, mint, token_program)?;
        self.submit(instruction::token_deposit(
            &self.config,
            &accounts,
            decimals,
            amount,
        )?)
    }

    /// Move tokens out of `user`'s vault ATA back to the user.
    pub fn token_withdraw(
        &mut self,
        user: &Pubkey,
        mint: &Pubkey,
        token_program: &Pubkey,
        decimals: u8,
        amount: u64,
    ) -> ClientResult<(), L> {
        let (vault, _) = pda::vault_address(&self.config.program_id, user)?;
        let accounts = TokenTransferAccounts {
            authority: *user,
            from_ata: pda::derive_associated_address(&vault, mint, token_program)?,
            to_ata: pda::derive_associated_address(user, mint, token_program)?,
            wallet: vault,
            mint: *mint,
            token_program: *token_program,
        };
        self.submit(instruction::token_withdraw(
            &self.config,
            &accounts,
            decimals,
            amount,
        )?)
    }

    // =========================================================================
    // CONFIG
    // =========================================================================

    pub fn config_address(&self) -> Result<Pubkey, CodecError> {
        pda::config_address(&self.config.program_id).map(|(address, _)| address)
    }

    pub fn init_config(&mut self, authority: &Pubkey, init: &ConfigInit) -> ClientResult<Pubkey, L> {
        let config = self.config_address()?;
        let accounts = InitConfigAccounts {
            authority: *authority,
            config,
            mints: init.mints,
            owner: init.owner,
            admin: init.admin,
        };
        self.submit(instruction::init_config(
            &self.config.program_id,
            &accounts,
            init.is_authorized,
            init.status,
            init.fee,
            &init.label,
        )?)?;
        Ok(config)
    }

    /// Send `UpdateConfig`; a zero timestamp slot is filled from the ledger
    /// clock.
    pub fn update_config(
        &mut self,
        signer: &Pubkey,
        extra: [&Pubkey; 2],
        mut args: UpdateConfigArgs,
    ) -> ClientResult<(), L> {
        if args.words[0] == 0 {
            args.words[0] = self
                .ledger
                .current_timestamp()
                .map_err(ClientError::Ledger)?;
        }
        let config = self.config_address()?;
        self.submit(instruction::update_config(
            &self.config.program_id,
            signer,
            &config,
            extra,
            args,
        )?)
    }

    pub fn close_config(&mut self, authority: &Pubkey, destination: &Pubkey) -> ClientResult<(), L> {
        let config = self.config_address()?;
        self.submit(instruction::close_config(
            &self.config.program_id,
            authority,
            &config,
            destination,
        )?)
    }

    pub fn config_resize(
        &mut self,
        authority: &Pubkey,
        program_owner: &Pubkey,
        new_size: u64,
    ) -> ClientResult<(), L> {
        let config = self.config_address()?;
        self.submit(instruction::config_resize(
            &self.config.program_id,
            authority,
            &config,
            program_owner,
            new_size,
        )?)
    }

    /// Read and decode the config account.
    pub fn fetch_config(&self) -> ClientResult<ConfigAccount, L> {
        let bytes = self.fetch(&self.config_address()?)?;
        Ok(ConfigAccount::unpack(&bytes)?)
    }

    // =========================================================================
    // ESCROW
    // =========================================================================

    pub fn escrow_make(
        &mut self,
        maker: &Pubkey,
        token_program: &Pubkey,
        offer: &EscrowOffer,
    ) -> ClientResult<Pubkey, L> {
        let program_id = self.config.program_id;
        let (escrow, _) = pda::escrow_address(&program_id, maker, offer.id)?;
        let accounts = EscrowMakeAccounts {
            maker: *maker,
            maker_ata_x: pda::derive_associated_address(maker, &offer.mint_x, token_program)?,
            escrow_ata: pda::derive_associated_address(&escrow, &offer.mint_x, token_program)?,
            escrow,
            mint_x: offer.mint_x,
            mint_y: offer.mint_y,
            config: self.config_address()?,
            token_program: *token_program,
        };
        self.submit(instruction::escrow_make(
            &self.config,
            &accounts,
            offer.decimals_x,
            offer.amount_x,
            offer.decimals_y,
            offer.amount_y,
            offer.id,
        )?)?;
        Ok(escrow)
    }

    fn settle_accounts(
        &self,
        maker: &Pubkey,
        mint_x: &Pubkey,
        mint_y: &Pubkey,
        token_program: &Pubkey,
        id: u64,
    ) -> Result<EscrowSettleAccounts, CodecError> {
        let (escrow, _) = pda::escrow_address(&self.config.program_id, maker, id)?;
        Ok(EscrowSettleAccounts {
            maker: *maker,
            maker_ata_x: pda::derive_associated_address(maker, mint_x, token_program)?,
            maker_ata_y: pda::derive_associated_address(maker, mint_y, token_program)?,
            escrow_ata_x: pda::derive_associated_address(&escrow, mint_x, token_program)?,
            escrow_ata_y: pda::derive_associated_address(&escrow, mint_y, token_program)?,
            mint_x: *mint_x,
            mint_y: *mint_y,
            escrow,
            config: self.config_address()?,
            token_program: *token_program,
        })
    }

    pub fn escrow_withdraw(
        &mut self,
        maker: &Pubkey,
        mint_x: &Pubkey,
        mint_y: &Pubkey,
        token_program: &Pubkey,
        id: u64,
    ) -> ClientResult<(), L> {
        let accounts = self.settle_accounts(maker, mint_x, mint_y, token_program, id)?;
        self.submit(instruction::escrow_withdraw(&self.config, &accounts, id)?)
    }

    pub fn escrow_cancel(
        &mut self,
        maker: &Pubkey,
        mint_x: &Pubkey,
        mint_y: &Pubkey,
        token_program: &Pubkey,
        id: u64,
    ) -> ClientResult<(), L> {
        let accounts = self.settle_accounts(maker, mint_x, mint_y, token_program, id)?;
        self.submit(instruction::escrow_cancel(&self.config, &accounts)?)
    }

    pub fn fetch_escrow(&self, maker: &Pubkey, id: u64) -> ClientResult<Escrow, L> {
        let (escrow, _) = pda::escrow_address(&self.config.program_id, maker, id)?;
        let bytes = self.fetch(&escrow)?;
        Ok(Escrow::unpack(&bytes)?)
    }

    /// Decode any account with an explicit schema.
    pub fn fetch_record(&self, address: &Pubkey, schema: &FieldSchema) -> ClientResult<Record, L> {
        let bytes = self.fetch(address)?;
        Ok(decode(&bytes, schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::spl_token,
        instruction::{ConfigSelector, VaultInstruction},
    };
    use std::collections::HashMap;

    #[derive(Debug, Error)]
    enum Offline {
        #[error("ledger offline")]
        Down,
        #[error("instruction rejected with custom code {0}")]
        Rejected(u32),
    }

    #[derive(Default)]
    struct MemoryLedger {
        accounts: HashMap<Pubkey, Vec<u8>>,
        submitted: Vec<Instruction>,
        now: u32,
        offline: bool,
        reject_with: Option<u32>,
    }

    impl LedgerClient for MemoryLedger {
        type Error = Offline;

        fn submit_instruction(&mut self, instruction: Instruction) -> Result<(), Offline> {
            if self.offline {
                return Err(Offline::Down);
            }
            if let Some(code) = self.reject_with {
                return Err(Offline::Rejected(code));
            }
            self.submitted.push(instruction);
            Ok(())
        }

        fn fetch_account_bytes(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, Offline> {
            Ok(self.accounts.get(address).cloned())
        }

        fn current_timestamp(&self) -> Result<u32, Offline> {
            Ok(self.now)
        }

        fn custom_code(error: &Offline) -> Option<u32> {
            match error {
                Offline::Rejected(code) => Some(*code),
                Offline::Down => None,
            }
        }
    }

    fn client() -> VaultClient<MemoryLedger> {
        VaultClient::new(MemoryLedger::default(), VaultConfig::default())
    }

    #[test]
    fn test_deposit_targets_vault_address() {
        let mut client = client();
        let owner = Pubkey::new_unique();
        let vault = client.deposit(&owner, 460_000_000).unwrap();

        let (expected, _) = pda::vault_address(&crate::id(), &owner).unwrap();
        assert_eq!(vault, expected);

        let ix = &client.ledger().submitted[0];
        assert_eq!(ix.accounts[1].pubkey, vault);
        assert_eq!(
            VaultInstruction::unpack(&ix.data).unwrap(),
            VaultInstruction::Deposit {
                amount: 460_000_000
            }
        );
    }

    #[test]
    fn test_update_config_stamps_ledger_time() {
        let mut client = client();
        client.ledger_mut().now = 1_700_000_000;
        let owner = Pubkey::new_unique();
        let admin = Pubkey::new_unique();

        let args = UpdateConfigArgs {
            selector: ConfigSelector::Admin,
            ..UpdateConfigArgs::default()
        };
        client.update_config(&owner, [&admin, &admin], args).unwrap();

        let ix = &client.ledger().submitted[0];
        assert_eq!(ix.accounts[1].pubkey, client.config_address().unwrap());
        match VaultInstruction::unpack(&ix.data).unwrap() {
            VaultInstruction::UpdateConfig(args) => {
                assert_eq!(args.timestamp(), 1_700_000_000);
                assert_eq!(args.selector, ConfigSelector::Admin);
            }
            other => panic!("unexpected instruction {other:?}"),
        }
    }

    #[test]
    fn test_fetch_config_decodes_bytes() {
        let mut client = client();
        let config = ConfigAccount {
            fee: 111_000_000,
            status: Status::Active,
            label: "MoonDog to the Moon!".to_string(),
            ..ConfigAccount::default()
        };
        let address = client.config_address().unwrap();
        client
            .ledger_mut()
            .accounts
            .insert(address, config.pack().unwrap());

        assert_eq!(client.fetch_config().unwrap(), config);

        let record = client
            .fetch_record(&address, &ConfigAccount::SCHEMA)
            .unwrap();
        assert_eq!(record.u64("fee").unwrap(), 111_000_000);
    }

    #[test]
    fn test_missing_and_truncated_accounts() {
        let mut client = client();
        assert!(matches!(
            client.fetch_config(),
            Err(ClientError::AccountNotFound(_))
        ));

        let address = client.config_address().unwrap();
        client.ledger_mut().accounts.insert(address, vec![0; 286]);
        assert!(matches!(
            client.fetch_config(),
            Err(ClientError::Codec(CodecError::SchemaLength {
                expected: 287,
                actual: 286
            }))
        ));
    }

    #[test]
    fn test_escrow_roundtrip_through_ledger() {
        let mut client = client();
        let maker = Pubkey::new_unique();
        let offer = EscrowOffer {
            mint_x: Pubkey::new_unique(),
            mint_y: Pubkey::new_unique(),
            decimals_x: 6,
            amount_x: 1_000,
            decimals_y: 9,
            amount_y: 2_000,
            id: 3,
        };
        let escrow = client.escrow_make(&maker, &spl_token::id(), &offer).unwrap();

        let stored = Escrow {
            maker,
            mint_maker: offer.mint_x,
            mint_taker: offer.mint_y,
            amount: offer.amount_y,
            bump: pda::escrow_address(&crate::id(), &maker, 3).unwrap().1,
        };
        client
            .ledger_mut()
            .accounts
            .insert(escrow, stored.pack().unwrap());
        assert_eq!(client.fetch_escrow(&maker, 3).unwrap(), stored);

        client
            .escrow_cancel(&maker, &offer.mint_x, &offer.mint_y, &spl_token::id(), 3)
            .unwrap();
        let cancel = &client.ledger().submitted[1];
        assert_eq!(cancel.data, vec![18]);
        assert_eq!(cancel.accounts[7].pubkey, escrow);
    }

    #[test]
    fn test_ledger_errors_propagate() {
        let mut client = client();
        client.ledger_mut().offline = true;
        let err = client.withdraw(&Pubkey::new_unique(), 1).unwrap_err();
        assert!(matches!(err, ClientError::Ledger(Offline::Down)));
        assert_eq!(err.to_string(), "ledger error: ledger offline");
    }

    #[test]
    fn test_program_codes_are_named() {
        let mut client = client();
        client.ledger_mut().reject_with = Some(32);
        let err = client.deposit(&Pubkey::new_unique(), 1).unwrap_err();
        assert!(matches!(err, ClientError::Program(ProgramFailure::VaultPda)));
        assert_eq!(
            err.to_string(),
            "program failure VaultPda: vault PDA does not match"
        );

        client.ledger_mut().reject_with = Some(900);
        let err = client.deposit(&Pubkey::new_unique(), 1).unwrap_err();
        assert!(matches!(err, ClientError::Ledger(Offline::Rejected(900))));
    }
}
