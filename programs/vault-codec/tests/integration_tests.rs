//! Integration Tests for the Vault Codec
//!
//! A small stand-in for the vault program runs inside `solana-program-test`.
//! It accepts payloads built by this crate, writes config bytes through the
//! same schemas, and the tests decode what landed on the ledger.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vault_codec
//! ```

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    instruction::{Instruction, InstructionError},
    msg,
    program::invoke,
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
};
use solana_program_test::*;
use solana_sdk::{
    account::Account,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use vault_codec::{
    decode,
    instruction::{self, ConfigSelector, InitConfigAccounts, UpdateConfigArgs, VaultInstruction},
    pda,
    state::{ConfigAccount, Pack, Status},
};

// =============================================================================
// MOCK VAULT PROGRAM
// =============================================================================

/// Minimal vault program: lamport deposits plus config init/update.
fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let instruction = VaultInstruction::unpack(instruction_data)?;
    msg!("Instruction: {}", instruction.name());

    match instruction {
        VaultInstruction::Deposit { amount } => {
            let owner = next_account_info(account_info_iter)?;
            let vault = next_account_info(account_info_iter)?;
            let _program = next_account_info(account_info_iter)?;
            let system_program = next_account_info(account_info_iter)?;

            if !owner.is_signer {
                return Err(ProgramError::MissingRequiredSignature);
            }
            let (expected, _) = pda::vault_address(program_id, owner.key)?;
            if expected != *vault.key {
                return Err(ProgramError::InvalidSeeds);
            }

            invoke(
                &system_instruction::transfer(owner.key, vault.key, amount),
                &[owner.clone(), vault.clone(), system_program.clone()],
            )
        }

        VaultInstruction::InitConfig {
            is_authorized,
            status,
            fee,
            label,
        } => {
            let authority = next_account_info(account_info_iter)?;
            let config_info = next_account_info(account_info_iter)?;
            let mut mints = [Pubkey::default(); 4];
            for mint in mints.iter_mut() {
                *mint = *next_account_info(account_info_iter)?.key;
            }
            let owner = next_account_info(account_info_iter)?;
            let admin = next_account_info(account_info_iter)?;

            let (expected, bump) = pda::config_address(program_id)?;
            if expected != *config_info.key {
                return Err(ProgramError::InvalidSeeds);
            }

            let config = ConfigAccount {
                mints,
                authority: *authority.key,
                owner: *owner.key,
                admin: *admin.key,
                label,
                fee,
                is_authorized,
                status,
                bump,
                ..ConfigAccount::default()
            };
            config.pack_into_slice(&mut config_info.try_borrow_mut_data()?)?;
            msg!("Config initialized");
            Ok(())
        }

        VaultInstruction::UpdateConfig(args) => {
            let _signer = next_account_info(account_info_iter)?;
            let config_info = next_account_info(account_info_iter)?;
            let extra = next_account_info(account_info_iter)?;

            let mut config = ConfigAccount::unpack(&config_info.try_borrow_data()?)?;
            match args.selector {
                ConfigSelector::Status => config.status = args.status,
                ConfigSelector::Fee => config.fee = args.fee(),
                ConfigSelector::Admin => config.admin = *extra.key,
            }
            config.updated_at = args.timestamp();
            config.label = args.label;
            config.pack_into_slice(&mut config_info.try_borrow_mut_data()?)?;
            Ok(())
        }

        other => {
            msg!("{} is not handled here", other.name());
            Err(ProgramError::InvalidInstructionData)
        }
    }
}

// =============================================================================
// TEST SETUP HELPERS
// =============================================================================

/// Addresses shared by one test run.
struct Fixture {
    program_id: Pubkey,
    config: Pubkey,
    config_bump: u8,
    admin: Pubkey,
    mints: [Pubkey; 4],
}

impl Fixture {
    fn new() -> Self {
        let program_id = vault_codec::id();
        let (config, config_bump) = pda::config_address(&program_id).unwrap();
        Self {
            program_id,
            config,
            config_bump,
            admin: Pubkey::new_unique(),
            mints: [
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
            ],
        }
    }

    /// ProgramTest with the mock program and a zeroed config account.
    fn program_test(&self) -> ProgramTest {
        let mut program_test = ProgramTest::new(
            "vault_mock",
            self.program_id,
            processor!(process_instruction),
        );
        program_test.add_account(
            self.config,
            Account {
                lamports: Rent::default().minimum_balance(ConfigAccount::LEN),
                data: vec![0; ConfigAccount::LEN],
                owner: self.program_id,
                executable: false,
                rent_epoch: 0,
            },
        );
        program_test
    }

    fn init_config_ix(&self, authority: &Pubkey, owner: &Pubkey) -> Instruction {
        instruction::init_config(
            &self.program_id,
            &InitConfigAccounts {
                authority: *authority,
                config: self.config,
                mints: self.mints,
                owner: *owner,
                admin: self.admin,
            },
            true,
            Status::Active,
            111_000_000,
            "MoonDog to the Moon!",
        )
        .unwrap()
    }
}

async fn send(
    banks_client: &mut BanksClient,
    payer: &Keypair,
    instruction: Instruction,
) -> Result<(), BanksClientError> {
    let recent_blockhash = banks_client.get_latest_blockhash().await.unwrap();
    let tx = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&payer.pubkey()),
        &[payer],
        recent_blockhash,
    );
    banks_client.process_transaction(tx).await
}

async fn get_config(banks_client: &mut BanksClient, address: &Pubkey) -> ConfigAccount {
    let account = banks_client.get_account(*address).await.unwrap().unwrap();
    ConfigAccount::unpack(&account.data).unwrap()
}

// =============================================================================
// TESTS
// =============================================================================

#[tokio::test]
async fn test_deposit_funds_vault_address() {
    let fixture = Fixture::new();
    let (mut banks_client, payer, _) = fixture.program_test().start().await;

    let (vault, _) = pda::vault_address(&fixture.program_id, &payer.pubkey()).unwrap();
    let ix = instruction::deposit(&fixture.program_id, &payer.pubkey(), &vault, 460_000_000).unwrap();
    send(&mut banks_client, &payer, ix).await.unwrap();

    let vault_account = banks_client.get_account(vault).await.unwrap().unwrap();
    assert_eq!(vault_account.lamports, 460_000_000);
}

#[tokio::test]
async fn test_deposit_to_wrong_vault_fails() {
    let fixture = Fixture::new();
    let (mut banks_client, payer, _) = fixture.program_test().start().await;

    let wrong = Pubkey::new_unique();
    let ix = instruction::deposit(&fixture.program_id, &payer.pubkey(), &wrong, 1_000_000).unwrap();
    let err = send(&mut banks_client, &payer, ix).await.unwrap_err();
    assert_eq!(
        err.unwrap(),
        TransactionError::InstructionError(0, InstructionError::InvalidSeeds)
    );
}

#[tokio::test]
async fn test_init_config_bytes_decode() {
    let fixture = Fixture::new();
    let (mut banks_client, payer, _) = fixture.program_test().start().await;
    let owner = Pubkey::new_unique();

    send(
        &mut banks_client,
        &payer,
        fixture.init_config_ix(&payer.pubkey(), &owner),
    )
    .await
    .unwrap();

    let config = get_config(&mut banks_client, &fixture.config).await;
    assert_eq!(config.mints, fixture.mints);
    assert_eq!(config.authority, payer.pubkey());
    assert_eq!(config.owner, owner);
    assert_eq!(config.admin, fixture.admin);
    assert_eq!(config.label, "MoonDog to the Moon!");
    assert_eq!(config.fee, 111_000_000);
    assert!(config.is_authorized);
    assert_eq!(config.status, Status::Active);
    assert_eq!(config.bump, fixture.config_bump);

    // The generic decoder reads the same bytes.
    let account = banks_client
        .get_account(fixture.config)
        .await
        .unwrap()
        .unwrap();
    let record = decode(&account.data, &ConfigAccount::SCHEMA).unwrap();
    assert_eq!(record.symbol("status").unwrap(), "Active");
    assert_eq!(record.u8("bump").unwrap(), fixture.config_bump);
}

#[tokio::test]
async fn test_update_config_fee_then_admin() {
    let fixture = Fixture::new();
    let (mut banks_client, payer, _) = fixture.program_test().start().await;
    let owner = Pubkey::new_unique();
    send(
        &mut banks_client,
        &payer,
        fixture.init_config_ix(&payer.pubkey(), &owner),
    )
    .await
    .unwrap();

    // Fee
    let new_admin = Pubkey::new_unique();
    let args = UpdateConfigArgs {
        selector: ConfigSelector::Fee,
        status: Status::Paused,
        words: [1_700_000_000, 0, 0, 0],
        amounts: [123_000_000, 274_000_000_000, 0, 0],
        label: "MoonDog to the Marzzz!".to_string(),
        ..UpdateConfigArgs::default()
    };
    let ix = instruction::update_config(
        &fixture.program_id,
        &payer.pubkey(),
        &fixture.config,
        [&new_admin, &new_admin],
        args,
    )
    .unwrap();
    send(&mut banks_client, &payer, ix).await.unwrap();

    let config = get_config(&mut banks_client, &fixture.config).await;
    assert_eq!(config.fee, 123_000_000);
    assert_eq!(config.updated_at, 1_700_000_000);
    assert_eq!(config.label, "MoonDog to the Marzzz!");
    assert_eq!(config.status, Status::Active);
    assert_eq!(config.admin, fixture.admin);

    // Admin
    let args = UpdateConfigArgs {
        selector: ConfigSelector::Admin,
        words: [1_700_000_100, 0, 0, 0],
        label: "MoonDog to the Marzzz!".to_string(),
        ..UpdateConfigArgs::default()
    };
    let ix = instruction::update_config(
        &fixture.program_id,
        &payer.pubkey(),
        &fixture.config,
        [&new_admin, &new_admin],
        args,
    )
    .unwrap();
    send(&mut banks_client, &payer, ix).await.unwrap();

    let config = get_config(&mut banks_client, &fixture.config).await;
    assert_eq!(config.admin, new_admin);
    assert_eq!(config.fee, 123_000_000);
    assert_eq!(config.updated_at, 1_700_000_100);
}

#[tokio::test]
async fn test_unknown_discriminator_maps_to_custom_code() {
    let fixture = Fixture::new();
    let (mut banks_client, payer, _) = fixture.program_test().start().await;

    let ix = Instruction {
        program_id: fixture.program_id,
        accounts: vec![],
        data: vec![3],
    };
    let err = send(&mut banks_client, &payer, ix).await.unwrap_err();
    assert_eq!(
        err.unwrap(),
        TransactionError::InstructionError(0, InstructionError::Custom(12))
    );
}

#[tokio::test]
async fn test_out_of_range_decimals_map_to_custom_code() {
    let fixture = Fixture::new();
    let (mut banks_client, payer, _) = fixture.program_test().start().await;

    let ix = Instruction {
        program_id: fixture.program_id,
        accounts: vec![],
        data: vec![2, 19],
    };
    let err = send(&mut banks_client, &payer, ix).await.unwrap_err();
    assert_eq!(
        err.unwrap(),
        TransactionError::InstructionError(0, InstructionError::Custom(17))
    );
}

#[tokio::test]
async fn test_truncated_payload_maps_to_schema_length() {
    let fixture = Fixture::new();
    let (mut banks_client, payer, _) = fixture.program_test().start().await;

    let mut ix = fixture.init_config_ix(&payer.pubkey(), &Pubkey::new_unique());
    ix.data.pop();
    let err = send(&mut banks_client, &payer, ix).await.unwrap_err();
    assert_eq!(
        err.unwrap(),
        TransactionError::InstructionError(0, InstructionError::Custom(5))
    );
}
