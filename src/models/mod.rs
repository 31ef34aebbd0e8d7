pub mod campaignmodel;
pub mod referralmodel;
pub mod usermodel;
