use std::io::{self, Write};

use common::Product;

pub const NO_PRODUCTS: &str = "There are no products in database";

const HEADERS: [&str; 4] = ["id", "name", "description", "price"];

/// Fixed-width text table; numbers are right aligned, text left aligned.
struct ProductTable {
    rows: Vec<[String; 4]>,
    widths: [usize; 4],
}

impl ProductTable {
    fn new(products: &[Product]) -> Self {
        let mut sorted: Vec<&Product> = products.iter().collect();
        sorted.sort_by_key(|p| p.id);

        let rows: Vec<[String; 4]> = sorted
            .into_iter()
            .map(|p| {
                [
                    p.id.to_string(),
                    p.name.clone(),
                    p.description.clone(),
                    format!("{:.2}", p.price),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        Self { rows, widths }
    }

    fn write_row<W: Write>(&self, out: &mut W, cells: [&str; 4]) -> io::Result<()> {
        let [id, name, description, price] = cells;
        let [wi, wn, wd, wp] = self.widths;
        let line = format!("{id:>wi$}  {name:<wn$}  {description:<wd$}  {price:>wp$}");
        writeln!(out, "{}", line.trim_end())
    }

    fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_row(out, HEADERS)?;
        for row in &self.rows {
            self.write_row(out, [&row[0], &row[1], &row[2], &row[3]])?;
        }
        writeln!(out)
    }
}

/// Print `products` ordered by id, or [`NO_PRODUCTS`] when there are none.
pub fn render_products<W: Write>(out: &mut W, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "{NO_PRODUCTS}");
    }
    ProductTable::new(products).write(out)
}
