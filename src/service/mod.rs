pub mod referral;
