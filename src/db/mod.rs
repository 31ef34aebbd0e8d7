pub mod campaigndb;
pub mod db;
pub mod referraldb;
pub mod userdb;
