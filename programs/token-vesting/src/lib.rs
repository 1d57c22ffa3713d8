use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;
use state::RevocationWindow;

// Program ID - will be updated after first deploy
declare_id!("MooNyh4CBUYEKyXVnjGYQ8mEiJDpGvJMdvrZx1iGeHV");

#[program]
pub mod token_vesting {
    use super::*;

    /// Deploy a vesting schedule (admin signs and pays)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `seed` - Disambiguates multiple schedules per beneficiary
    /// * `start` - Start of the linear unlock window (Unix seconds)
    /// * `duration` - Length of the unlock window in seconds
    /// * `otc_unlock_time` - When the one-shot buyout becomes callable
    /// * `revocation_window` - Accumulation window for a revocable
    ///   schedule, `None` for a non-revocable one
    ///
    pub fn create_schedule(
        ctx: Context<CreateSchedule>,
        seed: u64,
        start: i64,
        duration: u64,
        otc_unlock_time: i64,
        revocation_window: Option<RevocationWindow>,
    ) -> Result<()> {
        instructions::create_schedule::handler_create_schedule(
            ctx,
            seed,
            start,
            duration,
            otc_unlock_time,
            revocation_window,
        )
    }

    /// Register a token mint with a schedule and create its vault
    ///
    pub fn register_asset(ctx: Context<RegisterAsset>) -> Result<()> {
        instructions::register_asset::handler_register_asset(ctx)
    }

    /// Release the vested portion of one asset to the beneficiary
    /// (callable by anyone; no-op when nothing is vested)
    ///
    pub fn release(ctx: Context<Release>) -> Result<()> {
        instructions::release::handler_release(ctx)
    }

    /// Execute the one-shot discounted buyout (beneficiary only)
    ///
    pub fn otc(ctx: Context<Otc>) -> Result<()> {
        instructions::otc::handler_otc(ctx)
    }

    /// Claw back the unaccumulated fraction (admin only, one-shot)
    ///
    pub fn revoke(ctx: Context<Revoke>) -> Result<()> {
        instructions::revoke::handler_revoke(ctx)
    }
}
