//! Account directory: registration and the login check.

use std::collections::HashMap;

use unimart_core::{BuyerId, DomainError, DomainResult, SellerId};

use crate::user::{Buyer, Seller};

/// Outcome of a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Buyer(BuyerId),
    Seller(SellerId),
}

/// All registered accounts. Usernames are unique across buyers and sellers.
#[derive(Debug, Default)]
pub struct Directory {
    buyers: HashMap<BuyerId, Buyer>,
    sellers: HashMap<SellerId, Seller>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    fn username_taken(&self, username: &str) -> bool {
        self.buyers.values().any(|b| b.username == username)
            || self.sellers.values().any(|s| s.username == username)
    }

    pub fn register_buyer(&mut self, buyer: Buyer) -> DomainResult<BuyerId> {
        if self.username_taken(&buyer.username) {
            return Err(DomainError::conflict(format!(
                "username {} is already taken",
                buyer.username
            )));
        }
        let id = buyer.id;
        self.buyers.insert(id, buyer);
        Ok(id)
    }

    pub fn register_seller(&mut self, seller: Seller) -> DomainResult<SellerId> {
        if self.username_taken(&seller.username) {
            return Err(DomainError::conflict(format!(
                "username {} is already taken",
                seller.username
            )));
        }
        let id = seller.id;
        self.sellers.insert(id, seller);
        Ok(id)
    }

    /// Re-insert accounts without the uniqueness check (snapshot rehydration).
    pub fn insert_buyer(&mut self, buyer: Buyer) {
        self.buyers.insert(buyer.id, buyer);
    }

    pub fn insert_seller(&mut self, seller: Seller) {
        self.sellers.insert(seller.id, seller);
    }

    pub fn buyer(&self, id: BuyerId) -> Option<&Buyer> {
        self.buyers.get(&id)
    }

    pub fn buyer_mut(&mut self, id: BuyerId) -> Option<&mut Buyer> {
        self.buyers.get_mut(&id)
    }

    pub fn seller(&self, id: SellerId) -> Option<&Seller> {
        self.sellers.get(&id)
    }

    pub fn seller_mut(&mut self, id: SellerId) -> Option<&mut Seller> {
        self.sellers.get_mut(&id)
    }

    pub fn buyers(&self) -> impl Iterator<Item = &Buyer> {
        self.buyers.values()
    }

    pub fn sellers(&self) -> impl Iterator<Item = &Seller> {
        self.sellers.values()
    }

    pub fn buyer_by_username(&self, username: &str) -> Option<&Buyer> {
        self.buyers.values().find(|b| b.username == username)
    }

    pub fn seller_by_username(&self, username: &str) -> Option<&Seller> {
        self.sellers.values().find(|s| s.username == username)
    }

    /// Check credentials by exact string comparison.
    ///
    /// Every failure — unknown username or wrong password — returns the same
    /// [`DomainError::AuthenticationFailed`], so callers cannot enumerate
    /// usernames from the error.
    pub fn authenticate(&self, username: &str, password: &str) -> DomainResult<Session> {
        if let Some(buyer) = self.buyer_by_username(username) {
            if buyer.password == password {
                return Ok(Session::Buyer(buyer.id));
            }
            return Err(DomainError::AuthenticationFailed);
        }
        if let Some(seller) = self.seller_by_username(username) {
            if seller.password == password {
                return Ok(Session::Seller(seller.id));
            }
        }
        Err(DomainError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn directory_with_buyer() -> (Directory, BuyerId) {
        let mut dir = Directory::new();
        let id = dir
            .register_buyer(Buyer::new("username", "abc123", Utc::now()))
            .unwrap();
        (dir, id)
    }

    #[test]
    fn registered_buyer_authenticates() {
        let (dir, id) = directory_with_buyer();
        assert_eq!(
            dir.authenticate("username", "abc123").unwrap(),
            Session::Buyer(id)
        );
    }

    #[test]
    fn password_prefix_fails_generically() {
        let (dir, _) = directory_with_buyer();
        let err = dir.authenticate("username", "abc").unwrap_err();
        assert_eq!(err, DomainError::AuthenticationFailed);
    }

    #[test]
    fn unknown_user_fails_with_the_same_error_as_wrong_password() {
        let (dir, _) = directory_with_buyer();
        let unknown = dir.authenticate("nobody", "abc123").unwrap_err();
        let wrong = dir.authenticate("username", "wrong").unwrap_err();
        assert_eq!(unknown, wrong);
    }

    #[test]
    fn usernames_are_unique_across_account_kinds() {
        let (mut dir, _) = directory_with_buyer();
        let err = dir
            .register_seller(Seller::new("username", "pw", "Shop", Utc::now()))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn sellers_authenticate_too() {
        let mut dir = Directory::new();
        let id = dir
            .register_seller(Seller::new("shop", "s3cret", "Shop", Utc::now()))
            .unwrap();
        assert_eq!(
            dir.authenticate("shop", "s3cret").unwrap(),
            Session::Seller(id)
        );
    }
}
