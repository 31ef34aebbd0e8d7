pub mod campaigndtos;
pub mod maildtos;
pub mod userdtos;
