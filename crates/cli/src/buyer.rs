//! Buyer menu.

use std::io::{self, BufRead, Write};

use chrono::Utc;

use unimart_catalog::{Category, ProductDetails};
use unimart_core::{BuyerId, ProductId};
use unimart_reviews::Review;

use crate::shell::{format_cents, Shell};

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(crate) fn buyer_menu(&mut self, buyer_id: BuyerId) -> io::Result<()> {
        loop {
            writeln!(self.console.output)?;
            writeln!(self.console.output, " 1) browse by category")?;
            writeln!(self.console.output, " 2) view a product")?;
            writeln!(self.console.output, " 3) like a product")?;
            writeln!(self.console.output, " 4) add to cart")?;
            writeln!(self.console.output, " 5) view cart")?;
            writeln!(self.console.output, " 6) check out")?;
            writeln!(self.console.output, " 7) review a product")?;
            writeln!(self.console.output, " 8) my fidelity points")?;
            writeln!(self.console.output, " 0) log out")?;
            match self.console.choice("> ", 8)? {
                Some(1) => self.browse_by_category()?,
                Some(2) => self.view_product()?,
                Some(3) => self.like_product()?,
                Some(4) => self.add_to_cart(buyer_id)?,
                Some(5) => self.view_cart(buyer_id)?,
                Some(6) => self.check_out(buyer_id)?,
                Some(7) => self.review_product(buyer_id)?,
                Some(8) => self.show_points(buyer_id)?,
                _ => return Ok(()),
            }
        }
    }

    fn all_product_ids(&self) -> Vec<ProductId> {
        self.state.catalog.list().map(|p| p.id_typed()).collect()
    }

    pub(crate) fn choose_category(&mut self) -> io::Result<Option<Category>> {
        for (i, category) in Category::ALL.iter().enumerate() {
            writeln!(self.console.output, "{:2}) {category}", i + 1)?;
        }
        match self.console.choice("category (0 to cancel): ", Category::ALL.len() as i64)? {
            Some(0) | None => Ok(None),
            Some(n) => Ok(Some(Category::ALL[(n - 1) as usize])),
        }
    }

    fn browse_by_category(&mut self) -> io::Result<()> {
        let Some(category) = self.choose_category()? else {
            return Ok(());
        };
        let ids: Vec<ProductId> = self
            .state
            .catalog
            .by_category(category)
            .map(|p| p.id_typed())
            .collect();
        self.show_products(&ids)
    }

    fn view_product(&mut self) -> io::Result<()> {
        let ids = self.all_product_ids();
        let Some(id) = self.choose_product(&ids)? else {
            return Ok(());
        };
        // The id came from the listing above, but absence stays a normal
        // path rather than an error.
        let Some(p) = self.state.catalog.get(id) else {
            writeln!(self.console.output, "not found")?;
            return Ok(());
        };

        let now = Utc::now();
        let header = format!(
            "{} — {} ({}) — {} — qty {}",
            p.title(),
            p.category(),
            p.subcategory(),
            format_cents(p.unit_price_at(now)),
            p.quantity(),
        );
        let description = p.description().to_string();
        let bonus = p.bonus_points_at(now);
        let detail = match p.details() {
            ProductDetails::BookOrManual {
                isbn,
                author,
                editor,
                edition,
                volume,
                ..
            } => format!(
                "isbn {isbn}, by {author}, ed. {editor}, edition {edition}, volume {volume}"
            ),
            ProductDetails::LearningResource {
                isbn,
                organisation,
                edition,
                ..
            } => format!("isbn {isbn}, {organisation}, edition {edition}"),
            ProductDetails::ItEquipment { brand, model, .. }
            | ProductDetails::OfficeEquipment { brand, model }
            | ProductDetails::StationeryArticle { brand, model } => {
                format!("{brand} {model}")
            }
        };

        writeln!(self.console.output, "{header}")?;
        if !description.is_empty() {
            writeln!(self.console.output, "{description}")?;
        }
        writeln!(self.console.output, "{detail}")?;
        writeln!(self.console.output, "earns {bonus} bonus points per unit")?;

        let reviews: Vec<String> = self
            .state
            .reviews
            .for_product(id)
            .map(|r| format!("  {:.1}★ {} ({} likes)", r.rating, r.comment, r.likes()))
            .collect();
        if !reviews.is_empty() {
            writeln!(self.console.output, "reviews:")?;
            for line in reviews {
                writeln!(self.console.output, "{line}")?;
            }
        }
        Ok(())
    }

    fn like_product(&mut self) -> io::Result<()> {
        let ids = self.all_product_ids();
        let Some(id) = self.choose_product(&ids)? else {
            return Ok(());
        };
        if self.state.catalog.toggle_like(id, true) {
            writeln!(self.console.output, "liked")?;
        } else {
            writeln!(self.console.output, "not found")?;
        }
        Ok(())
    }

    fn add_to_cart(&mut self, buyer_id: BuyerId) -> io::Result<()> {
        let ids = self.all_product_ids();
        let Some(id) = self.choose_product(&ids)? else {
            return Ok(());
        };
        let Some(quantity) = self.console.integer("quantity: ")? else {
            return Ok(());
        };
        self.state.cart_mut(buyer_id).add(id, quantity);
        writeln!(self.console.output, "added to cart")?;
        Ok(())
    }

    fn view_cart(&mut self, buyer_id: BuyerId) -> io::Result<()> {
        let now = Utc::now();
        let cart_lines = self.state.cart_mut(buyer_id).lines.clone();
        let lines: Vec<String> = cart_lines
            .iter()
            .map(|line| match self.state.catalog.get(line.product_id) {
                Some(p) => format!(
                    "  {} x{} — {}",
                    p.title(),
                    line.quantity,
                    format_cents(p.unit_price_at(now) * line.quantity),
                ),
                None => format!("  (no longer listed) x{}", line.quantity),
            })
            .collect();
        if lines.is_empty() {
            writeln!(self.console.output, "your cart is empty")?;
        } else {
            for line in lines {
                writeln!(self.console.output, "{line}")?;
            }
        }
        Ok(())
    }

    fn check_out(&mut self, buyer_id: BuyerId) -> io::Result<()> {
        match self.state.place_order(buyer_id, Utc::now()) {
            Ok(order) => writeln!(
                self.console.output,
                "order placed: {} — earned {} fidelity points",
                format_cents(order.total_cents),
                order.points_earned,
            ),
            Err(err) => writeln!(self.console.output, "{err}"),
        }
    }

    fn review_product(&mut self, buyer_id: BuyerId) -> io::Result<()> {
        let ids = self.all_product_ids();
        let Some(id) = self.choose_product(&ids)? else {
            return Ok(());
        };
        let Some(rating) = self.console.decimal("rating (0-5): ")? else {
            return Ok(());
        };
        let Some(comment) = self.console.line("comment: ")? else {
            return Ok(());
        };
        self.state
            .post_review(Review::new(id, buyer_id, rating, comment, Utc::now()));
        writeln!(self.console.output, "review posted")?;
        Ok(())
    }

    fn show_points(&mut self, buyer_id: BuyerId) -> io::Result<()> {
        let points = self
            .state
            .directory
            .buyer(buyer_id)
            .map(|b| b.fidelity_points)
            .unwrap_or(0);
        writeln!(self.console.output, "you have {points} fidelity points")
    }
}
