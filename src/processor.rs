use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction, system_program,
    sysvar::clock::Clock,
    sysvar::Sysvar,
};

use crate::{
    error::BountyError,
    event::BountyEvent,
    instruction::BountyInstruction,
    state::{BountyRegistry, REGISTRY_SEED, REGISTRY_SPACE, VAULT_SEED},
};

pub struct Processor {}

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = BountyInstruction::try_from_slice(instruction_data)
            .map_err(|_| BountyError::InvalidInstruction)?;

        match instruction {
            BountyInstruction::InitializeRegistry => {
                msg!("Instruction: InitializeRegistry");
                Self::process_initialize_registry(program_id, accounts)
            }
            BountyInstruction::IssueBounty {
                data,
                deadline,
                amount,
            } => {
                msg!("Instruction: IssueBounty");
                Self::process_issue_bounty(program_id, accounts, data, deadline, amount)
            }
            BountyInstruction::FulfillBounty { bounty_id, data } => {
                msg!("Instruction: FulfillBounty");
                Self::process_fulfill_bounty(program_id, accounts, bounty_id, data)
            }
            BountyInstruction::AcceptFulfillment {
                bounty_id,
                fulfillment_id,
            } => {
                msg!("Instruction: AcceptFulfillment");
                Self::process_accept_fulfillment(program_id, accounts, bounty_id, fulfillment_id)
            }
            BountyInstruction::CancelBounty { bounty_id } => {
                msg!("Instruction: CancelBounty");
                Self::process_cancel_bounty(program_id, accounts, bounty_id)
            }
        }
    }

    fn process_initialize_registry(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();

        let payer_info = next_account_info(account_info_iter)?;
        let registry_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !payer_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if !system_program::check_id(system_program_info.key) {
            return Err(ProgramError::InvalidAccountData);
        }

        let (registry_key, registry_bump) =
            Pubkey::find_program_address(&[REGISTRY_SEED], program_id);
        if registry_key != *registry_info.key {
            return Err(ProgramError::InvalidAccountData);
        }

        if registry_info.owner == program_id {
            let registry = BountyRegistry::deserialize(&mut &registry_info.data.borrow()[..])?;
            if registry.is_initialized() {
                return Err(BountyError::RegistryAlreadyInitialized.into());
            }
        } else {
            let rent = Rent::get()?;
            let registry_rent = rent.minimum_balance(REGISTRY_SPACE);

            invoke_signed(
                &system_instruction::create_account(
                    payer_info.key,
                    registry_info.key,
                    registry_rent,
                    REGISTRY_SPACE as u64,
                    program_id,
                ),
                &[
                    payer_info.clone(),
                    registry_info.clone(),
                    system_program_info.clone(),
                ],
                &[&[REGISTRY_SEED, &[registry_bump]]],
            )?;
        }

        Self::store_registry(&BountyRegistry::new(), registry_info)?;

        msg!("Registry initialized by {}", payer_info.key);

        Ok(())
    }

    fn process_issue_bounty(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        data: String,
        deadline: i64,
        amount: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();

        let issuer_info = next_account_info(account_info_iter)?;
        let registry_info = next_account_info(account_info_iter)?;
        let vault_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !issuer_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if !system_program::check_id(system_program_info.key) {
            return Err(ProgramError::InvalidAccountData);
        }

        let mut registry = Self::load_registry(program_id, registry_info)?;

        // The id the new bounty will get, and therefore which vault holds
        // its custody. Clients derive the same address from registry.len().
        let bounty_id = registry.len();
        let (vault_key, _) = Self::vault_address(program_id, bounty_id);
        if vault_key != *vault_info.key {
            return Err(ProgramError::InvalidAccountData);
        }

        let now = Clock::get()?.unix_timestamp;
        let (_, event) = registry.issue_bounty(*issuer_info.key, data, deadline, amount, now)?;

        // Take the reward into custody. The vault is a system-owned PDA,
        // so funding it is a plain system transfer from the issuer.
        invoke(
            &system_instruction::transfer(issuer_info.key, vault_info.key, amount),
            &[
                issuer_info.clone(),
                vault_info.clone(),
                system_program_info.clone(),
            ],
        )?;

        Self::store_registry(&registry, registry_info)?;
        event.log();

        Ok(())
    }

    fn process_fulfill_bounty(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        bounty_id: u64,
        data: String,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();

        let fulfiller_info = next_account_info(account_info_iter)?;
        let registry_info = next_account_info(account_info_iter)?;

        if !fulfiller_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut registry = Self::load_registry(program_id, registry_info)?;

        let now = Clock::get()?.unix_timestamp;
        let (_, event) = registry.fulfill_bounty(*fulfiller_info.key, bounty_id, data, now)?;

        Self::store_registry(&registry, registry_info)?;
        event.log();

        Ok(())
    }

    fn process_accept_fulfillment(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        bounty_id: u64,
        fulfillment_id: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();

        let issuer_info = next_account_info(account_info_iter)?;
        let registry_info = next_account_info(account_info_iter)?;
        let vault_info = next_account_info(account_info_iter)?;
        let fulfiller_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !issuer_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if !system_program::check_id(system_program_info.key) {
            return Err(ProgramError::InvalidAccountData);
        }

        let mut registry = Self::load_registry(program_id, registry_info)?;

        let event =
            registry.accept_fulfillment(*issuer_info.key, bounty_id, fulfillment_id)?;
        let (fulfiller, amount) = match &event {
            BountyEvent::FulfillmentAccepted {
                fulfiller, amount, ..
            } => (*fulfiller, *amount),
            _ => return Err(ProgramError::InvalidAccountData),
        };

        // The recipient account must be the fulfiller recorded in state.
        if fulfiller != *fulfiller_info.key {
            return Err(ProgramError::InvalidAccountData);
        }

        Self::release_from_vault(
            program_id,
            vault_info,
            fulfiller_info,
            system_program_info,
            bounty_id,
            amount,
        )?;

        Self::store_registry(&registry, registry_info)?;
        event.log();

        Ok(())
    }

    fn process_cancel_bounty(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        bounty_id: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();

        let issuer_info = next_account_info(account_info_iter)?;
        let registry_info = next_account_info(account_info_iter)?;
        let vault_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !issuer_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if !system_program::check_id(system_program_info.key) {
            return Err(ProgramError::InvalidAccountData);
        }

        let mut registry = Self::load_registry(program_id, registry_info)?;

        let event = registry.cancel_bounty(*issuer_info.key, bounty_id)?;
        let amount = match &event {
            BountyEvent::BountyCancelled { amount, .. } => *amount,
            _ => return Err(ProgramError::InvalidAccountData),
        };

        Self::release_from_vault(
            program_id,
            vault_info,
            issuer_info,
            system_program_info,
            bounty_id,
            amount,
        )?;

        Self::store_registry(&registry, registry_info)?;
        event.log();

        Ok(())
    }

    fn load_registry(
        program_id: &Pubkey,
        registry_info: &AccountInfo,
    ) -> Result<BountyRegistry, ProgramError> {
        if registry_info.owner != program_id {
            return Err(ProgramError::IncorrectProgramId);
        }

        let registry = BountyRegistry::deserialize(&mut &registry_info.data.borrow()[..])?;
        if !registry.is_initialized() {
            return Err(BountyError::RegistryNotInitialized.into());
        }

        Ok(registry)
    }

    fn store_registry(registry: &BountyRegistry, registry_info: &AccountInfo) -> ProgramResult {
        registry.serialize(&mut &mut registry_info.data.borrow_mut()[..])?;
        Ok(())
    }

    fn vault_address(program_id: &Pubkey, bounty_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_SEED, &bounty_id.to_le_bytes()], program_id)
    }

    /// Moves `amount` lamports out of the bounty's vault. The vault is a
    /// system-owned PDA, so the transfer is signed with the vault's seeds.
    fn release_from_vault<'a>(
        program_id: &Pubkey,
        vault_info: &AccountInfo<'a>,
        recipient_info: &AccountInfo<'a>,
        system_program_info: &AccountInfo<'a>,
        bounty_id: u64,
        amount: u64,
    ) -> ProgramResult {
        let (vault_key, vault_bump) = Self::vault_address(program_id, bounty_id);
        if vault_key != *vault_info.key {
            return Err(ProgramError::InvalidAccountData);
        }

        if vault_info.lamports() < amount {
            return Err(ProgramError::InsufficientFunds);
        }

        let id_bytes = bounty_id.to_le_bytes();
        invoke_signed(
            &system_instruction::transfer(vault_info.key, recipient_info.key, amount),
            &[
                vault_info.clone(),
                recipient_info.clone(),
                system_program_info.clone(),
            ],
            &[&[VAULT_SEED, &id_bytes, &[vault_bump]]],
        )?;

        Ok(())
    }
}
