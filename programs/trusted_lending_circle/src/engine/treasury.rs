use anchor_lang::prelude::*;

use crate::errors::TlcError;
use crate::state::{PaymentMedium, TreasuryState};

/// External side of custody: moves value between the circle vault and the
/// outside world. Implementations perform the actual transfer and return an
/// error when it does not go through.
pub trait CustodyRail {
    /// Medium this rail moves.
    fn medium(&self) -> PaymentMedium;

    /// `from` -> vault.
    fn receive(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Vault -> `to`.
    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()>;

    /// Fails when a later `send` to `to` is already known to be refused.
    /// Lets a multi-transfer settlement bail out before the first transfer.
    fn check_payee(&self, to: &Pubkey) -> Result<()>;
}

impl TreasuryState {
    /// Pulls `amount` into custody. The balance moves only after the rail
    /// confirmed the transfer.
    pub fn deposit<R: CustodyRail>(
        &mut self,
        medium: &PaymentMedium,
        rail: &mut R,
        from: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        require!(rail.medium() == *medium, TlcError::UnsupportedMedium);

        let balance = self.balance.checked_add(amount).ok_or(TlcError::MathOverflow)?;
        let deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(TlcError::MathOverflow)?;

        rail.receive(from, amount)?;

        self.balance = balance;
        self.total_deposited = deposited;
        Ok(())
    }

    /// Releases `amount` to `to`. Checked against the balance first, debited
    /// only once the transfer succeeded; a failed transfer leaves the state as it was.
    pub fn release<R: CustodyRail>(
        &mut self,
        medium: &PaymentMedium,
        rail: &mut R,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        require!(rail.medium() == *medium, TlcError::UnsupportedMedium);
        require!(amount <= self.balance, TlcError::InsufficientTreasury);

        if amount == 0 {
            return Ok(());
        }

        let released = self
            .total_released
            .checked_add(amount)
            .ok_or(TlcError::MathOverflow)?;

        rail.send(to, amount)?;

        self.balance -= amount;
        self.total_released = released;
        Ok(())
    }

    pub fn reconciles(&self) -> bool {
        self.total_deposited.checked_sub(self.total_released) == Some(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testkit::{expect_err, MockRail};

    #[test]
    fn deposit_then_release_moves_balance() {
        let mut t = TreasuryState::default();
        let mut rail = MockRail::native();
        let member = Pubkey::new_unique();
        let winner = Pubkey::new_unique();

        t.deposit(&PaymentMedium::Native, &mut rail, &member, 10).unwrap();
        t.deposit(&PaymentMedium::Native, &mut rail, &member, 15).unwrap();
        assert_eq!(t.balance, 25);

        t.release(&PaymentMedium::Native, &mut rail, &winner, 20).unwrap();
        assert_eq!(t.balance, 5);
        assert_eq!(t.total_released, 20);
        assert!(t.reconciles());
        assert_eq!(rail.sent, vec![(winner, 20)]);
        assert_eq!(rail.vault, 5);
    }

    #[test]
    fn release_above_balance_is_refused_before_transfer() {
        let mut t = TreasuryState::default();
        let mut rail = MockRail::native();
        t.deposit(&PaymentMedium::Native, &mut rail, &Pubkey::new_unique(), 10).unwrap();

        expect_err(
            t.release(&PaymentMedium::Native, &mut rail, &Pubkey::new_unique(), 11),
            TlcError::InsufficientTreasury,
        );
        assert!(rail.sent.is_empty());
        assert_eq!(t.balance, 10);
    }

    #[test]
    fn failed_transfer_leaves_state_untouched() {
        let mut t = TreasuryState::default();
        let mut rail = MockRail::native();
        t.deposit(&PaymentMedium::Native, &mut rail, &Pubkey::new_unique(), 10).unwrap();
        let before = t.clone();

        rail.fail_sends = true;
        expect_err(
            t.release(&PaymentMedium::Native, &mut rail, &Pubkey::new_unique(), 4),
            TlcError::TransferFailed,
        );
        assert_eq!(t, before);

        rail.fail_receives = true;
        expect_err(
            t.deposit(&PaymentMedium::Native, &mut rail, &Pubkey::new_unique(), 4),
            TlcError::TransferFailed,
        );
        assert_eq!(t, before);
    }

    #[test]
    fn medium_mismatch_is_rejected_at_the_boundary() {
        let mut t = TreasuryState::default();
        let mint = Pubkey::new_unique();
        let mut rail = MockRail::native();

        expect_err(
            t.deposit(&PaymentMedium::Token { mint }, &mut rail, &Pubkey::new_unique(), 1),
            TlcError::UnsupportedMedium,
        );

        let mut token_rail = MockRail::token(Pubkey::new_unique());
        expect_err(
            t.deposit(&PaymentMedium::Token { mint }, &mut token_rail, &Pubkey::new_unique(), 1),
            TlcError::UnsupportedMedium,
        );
        assert_eq!(t, TreasuryState::default());
    }

    #[test]
    fn zero_release_is_a_no_op() {
        let mut t = TreasuryState::default();
        let mut rail = MockRail::native();
        t.release(&PaymentMedium::Native, &mut rail, &Pubkey::new_unique(), 0).unwrap();
        assert!(rail.sent.is_empty());
        assert!(t.reconciles());
    }
}
