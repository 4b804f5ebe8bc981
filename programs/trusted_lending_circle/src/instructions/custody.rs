use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    program::{invoke, invoke_signed},
    system_instruction,
};
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::engine::treasury::CustodyRail;
use crate::errors::TlcError;
use crate::state::{Circle, PaymentMedium};
use crate::utils::{CIRCLE_SEED, VAULT_SEED};

/// Moves lamports between wallets and the circle's system-owned vault PDA.
pub struct LamportRail<'info> {
    vault: AccountInfo<'info>,
    vault_seeds: Vec<Vec<u8>>,
    system_program: AccountInfo<'info>,
    /// Wallets that may appear on the other side of a transfer.
    parties: Vec<AccountInfo<'info>>,
}

impl<'info> LamportRail<'info> {
    pub fn new(
        circle: &Account<'info, Circle>,
        vault: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        parties: Vec<AccountInfo<'info>>,
    ) -> Result<Self> {
        require!(
            circle.config.medium == PaymentMedium::Native,
            TlcError::UnsupportedMedium
        );
        require_keys_eq!(vault.key(), circle.vault, TlcError::WrongCircle);

        Ok(Self {
            vault,
            vault_seeds: vec![
                VAULT_SEED.to_vec(),
                circle.key().to_bytes().to_vec(),
                vec![circle.vault_bump],
            ],
            system_program,
            parties,
        })
    }

    fn party(&self, key: &Pubkey) -> Result<AccountInfo<'info>> {
        self.parties
            .iter()
            .find(|a| a.key == key)
            .cloned()
            .ok_or_else(|| {
                msg!("custody: no account supplied for {}", key);
                error!(TlcError::TransferFailed)
            })
    }
}

impl<'info> CustodyRail for LamportRail<'info> {
    fn medium(&self) -> PaymentMedium {
        PaymentMedium::Native
    }

    fn receive(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let payer = self.party(from)?;
        let ix = system_instruction::transfer(from, self.vault.key, amount);
        invoke(
            &ix,
            &[payer, self.vault.clone(), self.system_program.clone()],
        )
        .map_err(|e| {
            msg!("custody: lamport deposit failed: {:?}", e);
            error!(TlcError::TransferFailed)
        })
    }

    fn check_payee(&self, to: &Pubkey) -> Result<()> {
        let dest = self.party(to)?;
        require!(dest.is_writable, TlcError::TransferFailed);
        Ok(())
    }

    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let dest = self.party(to)?;
        let ix = system_instruction::transfer(self.vault.key, to, amount);
        let seeds: Vec<&[u8]> = self.vault_seeds.iter().map(|s| s.as_slice()).collect();
        invoke_signed(
            &ix,
            &[self.vault.clone(), dest, self.system_program.clone()],
            &[seeds.as_slice()],
        )
        .map_err(|e| {
            msg!("custody: lamport release failed: {:?}", e);
            error!(TlcError::TransferFailed)
        })
    }
}

/// A wallet's token account for the circle mint, plus the wallet itself when
/// it signs (deposits only).
pub struct TokenParty<'info> {
    pub owner: Pubkey,
    pub token_account: AccountInfo<'info>,
    pub signer: Option<AccountInfo<'info>>,
}

impl<'info> TokenParty<'info> {
    /// Checks the token account holds the circle mint and belongs to `owner`.
    pub fn checked(
        mint: &Pubkey,
        owner: Pubkey,
        account: &Account<'info, TokenAccount>,
        signer: Option<AccountInfo<'info>>,
    ) -> Result<Self> {
        require_keys_eq!(account.mint, *mint, TlcError::UnsupportedMedium);
        require_keys_eq!(account.owner, owner, TlcError::RecipientMismatch);
        Ok(Self {
            owner,
            token_account: account.to_account_info(),
            signer,
        })
    }
}

/// Moves SPL tokens between wallets' token accounts and the circle's token
/// vault. The vault authority is the circle PDA.
pub struct TokenRail<'info> {
    mint: Pubkey,
    vault: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    authority_seeds: Vec<Vec<u8>>,
    token_program: AccountInfo<'info>,
    parties: Vec<TokenParty<'info>>,
}

impl<'info> TokenRail<'info> {
    pub fn new(
        circle: &Account<'info, Circle>,
        vault: &Account<'info, TokenAccount>,
        token_program: AccountInfo<'info>,
        parties: Vec<TokenParty<'info>>,
    ) -> Result<Self> {
        let mint = match circle.config.medium {
            PaymentMedium::Token { mint } => mint,
            PaymentMedium::Native => return err!(TlcError::UnsupportedMedium),
        };
        require_keys_eq!(vault.key(), circle.vault, TlcError::WrongCircle);
        require_keys_eq!(vault.mint, mint, TlcError::UnsupportedMedium);

        Ok(Self {
            mint,
            vault: vault.to_account_info(),
            authority: circle.to_account_info(),
            authority_seeds: vec![
                CIRCLE_SEED.to_vec(),
                circle.circle_id.to_le_bytes().to_vec(),
                vec![circle.bump],
            ],
            token_program,
            parties,
        })
    }

    fn party(&self, owner: &Pubkey) -> Result<&TokenParty<'info>> {
        self.parties.iter().find(|p| p.owner == *owner).ok_or_else(|| {
            msg!("custody: no token account supplied for {}", owner);
            error!(TlcError::TransferFailed)
        })
    }
}

impl<'info> CustodyRail for TokenRail<'info> {
    fn medium(&self) -> PaymentMedium {
        PaymentMedium::Token { mint: self.mint }
    }

    fn receive(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let party = self.party(from)?;
        let authority = party.signer.clone().ok_or_else(|| error!(TlcError::Unauthorized))?;

        token::transfer(
            CpiContext::new(
                self.token_program.clone(),
                Transfer {
                    from: party.token_account.clone(),
                    to: self.vault.clone(),
                    authority,
                },
            ),
            amount,
        )
        .map_err(|e| {
            msg!("custody: token deposit failed: {:?}", e);
            error!(TlcError::TransferFailed)
        })
    }

    fn check_payee(&self, to: &Pubkey) -> Result<()> {
        let dest = &self.party(to)?.token_account;
        require!(dest.is_writable, TlcError::TransferFailed);
        Ok(())
    }

    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let dest = self.party(to)?.token_account.clone();
        let seeds: Vec<&[u8]> = self.authority_seeds.iter().map(|s| s.as_slice()).collect();
        let signer_seeds: &[&[&[u8]]] = &[seeds.as_slice()];

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: dest,
                    authority: self.authority.clone(),
                },
                signer_seeds,
            ),
            amount,
        )
        .map_err(|e| {
            msg!("custody: token release failed: {:?}", e);
            error!(TlcError::TransferFailed)
        })
    }
}

/// The rail matching a circle's medium.
pub enum CircleRail<'info> {
    Lamports(LamportRail<'info>),
    Tokens(TokenRail<'info>),
}

impl<'info> CustodyRail for CircleRail<'info> {
    fn medium(&self) -> PaymentMedium {
        match self {
            CircleRail::Lamports(r) => r.medium(),
            CircleRail::Tokens(r) => r.medium(),
        }
    }

    fn receive(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        match self {
            CircleRail::Lamports(r) => r.receive(from, amount),
            CircleRail::Tokens(r) => r.receive(from, amount),
        }
    }

    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        match self {
            CircleRail::Lamports(r) => r.send(to, amount),
            CircleRail::Tokens(r) => r.send(to, amount),
        }
    }

    fn check_payee(&self, to: &Pubkey) -> Result<()> {
        match self {
            CircleRail::Lamports(r) => r.check_payee(to),
            CircleRail::Tokens(r) => r.check_payee(to),
        }
    }
}
