//! Seller menu.

use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, Utc};

use unimart_catalog::{Category, ProductDetails, ProductDraft, Promotion, Subcategory};
use unimart_core::{ProductId, SellerId};

use crate::shell::Shell;

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(crate) fn seller_menu(&mut self, seller_id: SellerId) -> io::Result<()> {
        loop {
            writeln!(self.console.output)?;
            writeln!(self.console.output, " 1) my products")?;
            writeln!(self.console.output, " 2) list a new product")?;
            writeln!(self.console.output, " 3) set a promotion")?;
            writeln!(self.console.output, " 4) adjust quantity")?;
            writeln!(self.console.output, " 5) remove a product")?;
            writeln!(self.console.output, " 0) log out")?;
            match self.console.choice("> ", 5)? {
                Some(1) => {
                    let ids = self.own_product_ids(seller_id);
                    self.show_products(&ids)?;
                }
                Some(2) => self.list_new_product(seller_id)?,
                Some(3) => self.set_promotion(seller_id)?,
                Some(4) => self.restock(seller_id)?,
                Some(5) => self.remove_product(seller_id)?,
                _ => return Ok(()),
            }
        }
    }

    fn own_product_ids(&self, seller_id: SellerId) -> Vec<ProductId> {
        self.state
            .catalog
            .by_seller(seller_id)
            .map(|p| p.id_typed())
            .collect()
    }

    fn choose_subcategory(&mut self, category: Category) -> io::Result<Option<Subcategory>> {
        let subs = category.subcategories();
        for (i, sub) in subs.iter().enumerate() {
            writeln!(self.console.output, "{:2}) {sub}", i + 1)?;
        }
        match self
            .console
            .choice("subcategory (0 to cancel): ", subs.len() as i64)?
        {
            Some(0) | None => Ok(None),
            Some(n) => Ok(Some(subs[(n - 1) as usize])),
        }
    }

    fn release_date(&mut self) -> io::Result<Option<NaiveDate>> {
        let Some(raw) = self
            .console
            .line("release date (YYYY-MM-DD, blank to skip): ")?
        else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(_) => {
                writeln!(self.console.output, "unreadable date, skipping")?;
                Ok(None)
            }
        }
    }

    fn details_for(&mut self, category: Category) -> io::Result<Option<ProductDetails>> {
        let details = match category {
            Category::BookOrManual => {
                let Some(isbn) = self.console.line("isbn: ")? else {
                    return Ok(None);
                };
                let Some(author) = self.console.line("author: ")? else {
                    return Ok(None);
                };
                let Some(editor) = self.console.line("editor: ")? else {
                    return Ok(None);
                };
                let release_date = self.release_date()?;
                let Some(edition) = self.console.integer("edition: ")? else {
                    return Ok(None);
                };
                let Some(volume) = self.console.integer("volume: ")? else {
                    return Ok(None);
                };
                ProductDetails::BookOrManual {
                    isbn,
                    author,
                    editor,
                    release_date,
                    edition: clamp_to_u32(edition),
                    volume: clamp_to_u32(volume),
                }
            }
            Category::LearningResource => {
                let Some(isbn) = self.console.line("isbn: ")? else {
                    return Ok(None);
                };
                let Some(organisation) = self.console.line("organisation: ")? else {
                    return Ok(None);
                };
                let release_date = self.release_date()?;
                let Some(edition) = self.console.integer("edition: ")? else {
                    return Ok(None);
                };
                ProductDetails::LearningResource {
                    isbn,
                    organisation,
                    release_date,
                    edition: clamp_to_u32(edition),
                }
            }
            Category::ItEquipment => {
                let Some(brand) = self.console.line("brand: ")? else {
                    return Ok(None);
                };
                let Some(model) = self.console.line("model: ")? else {
                    return Ok(None);
                };
                let release_date = self.release_date()?;
                ProductDetails::ItEquipment {
                    brand,
                    model,
                    release_date,
                }
            }
            Category::OfficeEquipment => {
                let Some(brand) = self.console.line("brand: ")? else {
                    return Ok(None);
                };
                let Some(model) = self.console.line("model: ")? else {
                    return Ok(None);
                };
                ProductDetails::OfficeEquipment { brand, model }
            }
            Category::StationeryArticle => {
                let Some(brand) = self.console.line("brand: ")? else {
                    return Ok(None);
                };
                let Some(model) = self.console.line("model: ")? else {
                    return Ok(None);
                };
                ProductDetails::StationeryArticle { brand, model }
            }
        };
        Ok(Some(details))
    }

    fn list_new_product(&mut self, seller_id: SellerId) -> io::Result<()> {
        let Some(category) = self.choose_category()? else {
            return Ok(());
        };
        let Some(subcategory) = self.choose_subcategory(category)? else {
            return Ok(());
        };
        let Some(title) = self.console.line("title: ")? else {
            return Ok(());
        };
        let Some(description) = self.console.line("description: ")? else {
            return Ok(());
        };
        let Some(price_cents) = self.console.integer("price in cents: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.console.integer("quantity: ")? else {
            return Ok(());
        };
        let Some(bonus_points) = self.console.integer("bonus fidelity points: ")? else {
            return Ok(());
        };
        let Some(details) = self.details_for(category)? else {
            return Ok(());
        };

        let draft = ProductDraft {
            price_cents,
            quantity,
            title,
            description,
            category,
            subcategory,
            seller_id,
            bonus_points,
        };
        match self.state.catalog.create(draft, details, Utc::now()) {
            Ok(id) => writeln!(self.console.output, "listed as {id}"),
            Err(err) => writeln!(self.console.output, "{err}"),
        }
    }

    fn set_promotion(&mut self, seller_id: SellerId) -> io::Result<()> {
        let ids = self.own_product_ids(seller_id);
        let Some(id) = self.choose_product(&ids)? else {
            return Ok(());
        };
        let Some(discount_cents) = self.console.integer("discount in cents: ")? else {
            return Ok(());
        };
        let Some(bonus_points) = self.console.integer("promotional bonus points: ")? else {
            return Ok(());
        };
        let Some(days) = self.console.integer("days to run: ")? else {
            return Ok(());
        };
        let promotion = Promotion {
            discount_cents,
            bonus_points,
            ends_at: Utc::now() + chrono::Duration::days(days),
        };
        if self.state.catalog.apply_promotion(id, promotion) {
            writeln!(self.console.output, "promotion set")?;
        } else {
            writeln!(self.console.output, "not found")?;
        }
        Ok(())
    }

    fn restock(&mut self, seller_id: SellerId) -> io::Result<()> {
        let ids = self.own_product_ids(seller_id);
        let Some(id) = self.choose_product(&ids)? else {
            return Ok(());
        };
        let Some(delta) = self.console.integer("quantity change (+/-): ")? else {
            return Ok(());
        };
        match self.state.catalog.adjust_quantity(id, delta) {
            Some(quantity) => writeln!(self.console.output, "quantity is now {quantity}"),
            None => writeln!(self.console.output, "not found"),
        }
    }

    fn remove_product(&mut self, seller_id: SellerId) -> io::Result<()> {
        let ids = self.own_product_ids(seller_id);
        let Some(id) = self.choose_product(&ids)? else {
            return Ok(());
        };
        match self.state.catalog.remove(id) {
            Some(product) => writeln!(self.console.output, "removed {}", product.title()),
            None => writeln!(self.console.output, "not found"),
        }
    }
}

/// Edition/volume numbers are stored as `u32`; out-of-range console input
/// pins to the nearest representable value instead of wrapping.
fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::Shell;
    use unimart_accounts::Seller;
    use unimart_store::MarketState;

    fn state_with_seller() -> MarketState {
        let mut state = MarketState::new();
        state
            .directory
            .register_seller(Seller::new("shop", "s3cret", "Shop", Utc::now()))
            .unwrap();
        state
    }

    fn run_script(state: MarketState, script: &str) -> (MarketState, String) {
        let mut shell = Shell::new(state, script.as_bytes(), Vec::new());
        shell.run().unwrap();
        (shell.state, String::from_utf8(shell.console.output).unwrap())
    }

    const LOGIN: &str = "1\nshop\ns3cret\n";

    #[test]
    fn seller_lists_a_book_with_subcategory_from_the_registry() {
        let state = state_with_seller();
        // category 1 (book or manual), subcategory 2 (comic), then fields.
        let script = format!(
            "{LOGIN}2\n1\n2\ntitle\na fine comic\n1500\n3\n10\n978-0\nauthor\neditor\n\n2\n1\n1\n0\n0\n"
        );
        let (state, transcript) = run_script(state, &script);
        assert!(transcript.contains("listed as"));
        let product = state.catalog.list().next().unwrap();
        assert_eq!(product.title(), "title");
        assert_eq!(product.category(), Category::BookOrManual);
        assert_eq!(product.subcategory(), Subcategory::Comic);
        assert_eq!(product.price_cents(), 1500);
        assert_eq!(product.bonus_points(), 10);
    }

    #[test]
    fn promotion_and_restock_round_trip() {
        let state = state_with_seller();
        // list a stationery article (category 5, subcategory 1), then set a
        // promotion on it and restock by +5.
        let script = format!(
            "{LOGIN}2\n5\n1\nnotebook\n\n450\n10\n0\nPenco\nA5\n3\n1\n100\n5\n7\n4\n1\n5\n0\n0\n"
        );
        let (state, transcript) = run_script(state, &script);
        assert!(transcript.contains("promotion set"));
        assert!(transcript.contains("quantity is now 15"));
        let product = state.catalog.list().next().unwrap();
        assert!(product.promotion().is_some());
    }

    #[test]
    fn edition_numbers_pin_to_the_storable_range() {
        assert_eq!(clamp_to_u32(-3), 0);
        assert_eq!(clamp_to_u32(7), 7);
        assert_eq!(clamp_to_u32(i64::from(u32::MAX) + 1), u32::MAX);
    }

    #[test]
    fn remove_product_empties_the_catalog() {
        let state = state_with_seller();
        let script = format!(
            "{LOGIN}2\n4\n2\nchair\n\n2000\n1\n0\nSteel\nC2\n5\n1\n0\n0\n"
        );
        let (state, transcript) = run_script(state, &script);
        assert!(transcript.contains("removed chair"));
        assert!(state.catalog.is_empty());
    }
}
