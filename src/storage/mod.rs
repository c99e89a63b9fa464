mod account_storage;

use crate::models::Account;

pub use account_storage::AccountStorage;

pub trait Storage: Send + Sync + 'static {
    fn load(&self, name: &str) -> Option<Account>;
    fn save(&self, name: &str, account: Account);
}
