use anchor_lang::prelude::*;

use crate::constants::SCHEDULE_SEED;
use crate::error::VestingError;
use crate::state::{OtcState, RevocationState, RevocationWindow, VestingSchedule};

/// Deploy a vesting schedule
///
/// Timing is validated once here; every later call trusts it. Funding
/// happens separately by transferring tokens into a registered asset
/// vault.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `seed` - Disambiguates multiple schedules per beneficiary
/// * `start` - Start of the linear unlock window
/// * `duration` - Length of the unlock window in seconds
/// * `otc_unlock_time` - When the one-shot buyout becomes callable
/// * `revocation_window` - Accumulation window for a revocable schedule,
///   or `None` for a non-revocable one
///
#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct CreateSchedule<'info> {
    /// Treasury/multisig deploying the grant (signer, payer)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// CHECK: Beneficiary address; recorded, never read or written
    #[account(
        constraint = beneficiary.key() != Pubkey::default() @ VestingError::InvalidBeneficiary,
        constraint = beneficiary.key() != admin.key() @ VestingError::InvalidBeneficiary
    )]
    pub beneficiary: UncheckedAccount<'info>,

    /// Schedule PDA
    #[account(
        init,
        payer = admin,
        space = 8 + VestingSchedule::INIT_SPACE,
        seeds = [SCHEDULE_SEED, beneficiary.key().as_ref(), &seed.to_le_bytes()],
        bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    pub system_program: Program<'info, System>,
}

pub fn handler_create_schedule(
    ctx: Context<CreateSchedule>,
    seed: u64,
    start: i64,
    duration: u64,
    otc_unlock_time: i64,
    revocation_window: Option<RevocationWindow>,
) -> Result<()> {
    VestingSchedule::validate_dates(start, duration, otc_unlock_time, revocation_window.as_ref())?;

    let schedule = &mut ctx.accounts.schedule;
    schedule.beneficiary = ctx.accounts.beneficiary.key();
    schedule.admin = ctx.accounts.admin.key();
    schedule.seed = seed;
    schedule.start = start;
    schedule.duration = duration;
    schedule.otc_unlock_time = otc_unlock_time;
    schedule.otc = OtcState::Pending;
    schedule.revocation = match revocation_window {
        Some(w) => RevocationState::Revocable {
            accumulation_start: w.accumulation_start,
            accumulation_end: w.accumulation_end,
        },
        None => RevocationState::NonRevocable,
    };
    schedule.bump = ctx.bumps.schedule;

    emit!(ScheduleCreated {
        schedule: schedule.key(),
        beneficiary: schedule.beneficiary,
        admin: schedule.admin,
        start,
        duration,
        otc_unlock_time,
        revocable: revocation_window.is_some(),
    });

    msg!(
        "Schedule created for {}: start={}, duration={}s, otc_unlock={}",
        schedule.beneficiary,
        start,
        duration,
        otc_unlock_time
    );

    Ok(())
}

#[event]
pub struct ScheduleCreated {
    pub schedule: Pubkey,
    pub beneficiary: Pubkey,
    pub admin: Pubkey,
    pub start: i64,
    pub duration: u64,
    pub otc_unlock_time: i64,
    pub revocable: bool,
}
