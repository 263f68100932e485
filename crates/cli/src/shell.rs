//! Interactive menu shell.
//!
//! Text menus drive every operation; validation failures print a plain
//! message and return to the menu, and lookup misses are a normal path.

use std::io::{self, BufRead, Write};

use chrono::Utc;

use unimart_accounts::{Buyer, Seller, Session};
use unimart_core::ProductId;
use unimart_store::MarketState;

use crate::console::Console;

pub struct Shell<R, W> {
    pub state: MarketState,
    pub console: Console<R, W>,
}

/// Format currency minor units as dollars.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(state: MarketState, input: R, output: W) -> Self {
        Self {
            state,
            console: Console::new(input, output),
        }
    }

    /// Run the welcome loop until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.console.output, "unimart — campus marketplace")?;
        loop {
            writeln!(self.console.output)?;
            writeln!(self.console.output, " 1) log in")?;
            writeln!(self.console.output, " 2) register as buyer")?;
            writeln!(self.console.output, " 3) register as seller")?;
            writeln!(self.console.output, " 0) save and quit")?;
            match self.console.choice("> ", 3)? {
                Some(1) => self.login()?,
                Some(2) => self.register_buyer()?,
                Some(3) => self.register_seller()?,
                _ => return Ok(()),
            }
        }
    }

    fn login(&mut self) -> io::Result<()> {
        let Some(username) = self.console.line("username: ")? else {
            return Ok(());
        };
        let Some(password) = self.console.line("password: ")? else {
            return Ok(());
        };
        match self.state.directory.authenticate(&username, &password) {
            Ok(Session::Buyer(id)) => self.buyer_menu(id),
            Ok(Session::Seller(id)) => self.seller_menu(id),
            Err(err) => writeln!(self.console.output, "{err}"),
        }
    }

    fn register_buyer(&mut self) -> io::Result<()> {
        let Some(username) = self.console.line("username: ")? else {
            return Ok(());
        };
        let Some(password) = self.console.line("password: ")? else {
            return Ok(());
        };
        let Some(first_name) = self.console.line("first name: ")? else {
            return Ok(());
        };
        let Some(last_name) = self.console.line("last name: ")? else {
            return Ok(());
        };
        let mut buyer = Buyer::new(username, password, Utc::now());
        buyer.first_name = first_name;
        buyer.last_name = last_name;
        match self.state.directory.register_buyer(buyer) {
            Ok(_) => writeln!(self.console.output, "buyer registered, you can log in now"),
            Err(err) => writeln!(self.console.output, "{err}"),
        }
    }

    fn register_seller(&mut self) -> io::Result<()> {
        let Some(username) = self.console.line("username: ")? else {
            return Ok(());
        };
        let Some(password) = self.console.line("password: ")? else {
            return Ok(());
        };
        let Some(business_name) = self.console.line("business name: ")? else {
            return Ok(());
        };
        match self
            .state
            .directory
            .register_seller(Seller::new(username, password, business_name, Utc::now()))
        {
            Ok(_) => writeln!(self.console.output, "seller registered, you can log in now"),
            Err(err) => writeln!(self.console.output, "{err}"),
        }
    }

    /// Print a numbered product listing.
    pub(crate) fn show_products(&mut self, ids: &[ProductId]) -> io::Result<()> {
        if ids.is_empty() {
            writeln!(self.console.output, "nothing here yet")?;
            return Ok(());
        }
        let now = Utc::now();
        for (i, id) in ids.iter().enumerate() {
            // Listings are built from the catalog just before display; a miss
            // would mean the product vanished in between, so skip it quietly.
            let Some(p) = self.state.catalog.get(*id) else {
                continue;
            };
            let promo = if p.promotion_active(now) { " [promo]" } else { "" };
            writeln!(
                self.console.output,
                "{:2}) {} — {} — {} — qty {} — {} likes — rated {:.1}{}",
                i + 1,
                p.title(),
                p.category(),
                format_cents(p.unit_price_at(now)),
                p.quantity(),
                p.likes(),
                p.rating(),
                promo,
            )?;
        }
        Ok(())
    }

    /// Show a listing and let the user pick one entry (0 cancels).
    pub(crate) fn choose_product(&mut self, ids: &[ProductId]) -> io::Result<Option<ProductId>> {
        if ids.is_empty() {
            writeln!(self.console.output, "nothing here yet")?;
            return Ok(None);
        }
        self.show_products(ids)?;
        match self.console.choice("pick (0 to cancel): ", ids.len() as i64)? {
            Some(0) | None => Ok(None),
            Some(n) => Ok(Some(ids[(n - 1) as usize])),
        }
    }
}
