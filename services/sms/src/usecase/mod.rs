pub mod sms_cache;
