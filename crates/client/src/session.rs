//! Menu loop of the interactive client.
//!
//! Each pass through [`Session::step`] handles one state and returns the
//! next one. Every state except [`MenuState::Exit`] leads back to the menu.
//! Nothing a single operation does (bad input, a failed request) ends the
//! loop; only the exit selector or a closed input does.

use std::io::{self, BufRead, Write};

use common::{ProductField, ProductFieldError, ProductInput};
use tracing::debug;

use crate::api::ProductApi;
use crate::error_log::ErrorLog;
use crate::errors::{ClientError, TransportError, ValidationError};
use crate::input::{parse_id, parse_price, parse_text, Console};
use crate::render::render_products;

pub const MENU_TEXT: &str = "\
What operation would you like to perform?
1- Insert product
2- View all products
3- Update product
4- Delete product
0- Exit
Choose an option: ";

pub const INVALID_SELECTOR: &str = "Invalid input. Please try again.";
pub const GOODBYE: &str = "Thank you for using the API service.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Menu,
    Create,
    List,
    Update,
    Delete,
    Exit,
}

impl MenuState {
    /// Map a menu answer to the state it selects.
    pub fn from_selector(raw: &str) -> Option<Self> {
        match raw.trim().parse::<i64>().ok()? {
            0 => Some(MenuState::Exit),
            1 => Some(MenuState::Create),
            2 => Some(MenuState::List),
            3 => Some(MenuState::Update),
            4 => Some(MenuState::Delete),
            _ => None,
        }
    }
}

/// Why an operation stopped collecting input.
enum Stop {
    /// Bad value, already reported.
    Cancelled,
    /// Input closed.
    Closed,
    Io(io::Error),
}

impl From<io::Error> for Stop {
    fn from(e: io::Error) -> Self {
        Stop::Io(e)
    }
}

impl Stop {
    fn into_state(self) -> io::Result<MenuState> {
        match self {
            Stop::Cancelled => Ok(MenuState::Menu),
            Stop::Closed => Ok(MenuState::Exit),
            Stop::Io(e) => Err(e),
        }
    }
}

pub struct Session<'a, A: ?Sized, R, W> {
    api: &'a A,
    log: &'a ErrorLog,
    console: Console<R, W>,
}

impl<'a, A, R, W> Session<'a, A, R, W>
where
    A: ProductApi + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(api: &'a A, log: &'a ErrorLog, console: Console<R, W>) -> Self {
        Self { api, log, console }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run the menu until the user exits or the input closes.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut state = MenuState::Menu;
        while state != MenuState::Exit {
            state = self.step(state).await?;
        }
        self.console.say(GOODBYE)
    }

    pub async fn step(&mut self, state: MenuState) -> io::Result<MenuState> {
        debug!(?state, "menu step");
        match state {
            MenuState::Menu => self.menu(),
            MenuState::Create => self.create().await,
            MenuState::List => self.list().await,
            MenuState::Update => self.update().await,
            MenuState::Delete => self.delete().await,
            MenuState::Exit => Ok(MenuState::Exit),
        }
    }

    fn menu(&mut self) -> io::Result<MenuState> {
        let Some(answer) = self.console.prompt(MENU_TEXT)? else {
            return Ok(MenuState::Exit);
        };
        match MenuState::from_selector(&answer) {
            Some(next) => Ok(next),
            None => {
                self.console.say(INVALID_SELECTOR)?;
                Ok(MenuState::Menu)
            }
        }
    }

    async fn create(&mut self) -> io::Result<MenuState> {
        let input = match self.read_product_input() {
            Ok(input) => input,
            Err(stop) => return stop.into_state(),
        };
        match self.api.create(&input).await {
            Ok(product) => {
                debug!(id = product.id, "product created");
                self.console.say(&format!("Product '{}' added successfully.", input.name))?;
            }
            Err(e) => self.transport_failure("creating product", e)?,
        }
        Ok(MenuState::Menu)
    }

    async fn list(&mut self) -> io::Result<MenuState> {
        match self.api.list().await {
            Ok(products) => render_products(self.console.output(), &products)?,
            Err(e) => self.transport_failure("fetching products", e)?,
        }
        Ok(MenuState::Menu)
    }

    async fn update(&mut self) -> io::Result<MenuState> {
        let id = match self.read_with("Enter the ID of the product to update: ", parse_id) {
            Ok(id) => id,
            Err(stop) => return stop.into_state(),
        };
        let input = match self.read_product_input() {
            Ok(input) => input,
            Err(stop) => return stop.into_state(),
        };
        match self.api.update(id, &input).await {
            Ok(_) => self.console.say(&format!("Product '{}' updated successfully.", input.name))?,
            Err(e) => self.transport_failure("updating product", e)?,
        }
        Ok(MenuState::Menu)
    }

    async fn delete(&mut self) -> io::Result<MenuState> {
        let id = match self.read_with("Enter the ID of the product to delete: ", parse_id) {
            Ok(id) => id,
            Err(stop) => return stop.into_state(),
        };
        match self.api.delete(id).await {
            Ok(()) => self.console.say(&format!("Product with ID {id} deleted successfully."))?,
            Err(e) => self.transport_failure("deleting product", e)?,
        }
        Ok(MenuState::Menu)
    }

    /// Prompt once and parse the answer, reporting a rejected value.
    fn read_with<T>(
        &mut self,
        label: &str,
        parse: impl FnOnce(&str) -> Result<T, ValidationError>,
    ) -> Result<T, Stop> {
        let raw = self.console.prompt(label)?.ok_or(Stop::Closed)?;
        match parse(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                self.validation_failure(e)?;
                Err(Stop::Cancelled)
            }
        }
    }

    /// Name, description and price, stopping at the first bad field.
    fn read_product_input(&mut self) -> Result<ProductInput, Stop> {
        let name = self.read_with("Enter product name: ", |raw| parse_text(ProductField::Name, raw))?;
        let description = self.read_with("Enter product description: ", |raw| {
            parse_text(ProductField::Description, raw)
        })?;
        let price = self.read_with("Enter product price: ", parse_price)?;

        match ProductInput::new(&name, &description, price) {
            Ok(input) => Ok(input),
            Err(e) => {
                self.validation_failure(e.into())?;
                Err(Stop::Cancelled)
            }
        }
    }

    fn validation_failure(&mut self, err: ValidationError) -> io::Result<()> {
        debug!(error = %err, "input rejected");
        self.console.say(&format!("Error: {err}. Operation canceled."))?;
        // Blank text fields are only reported; numeric ones are logged too.
        if !matches!(err, ValidationError::Field(ProductFieldError::Empty(_))) {
            self.log.record(&ClientError::Validation(err));
        }
        Ok(())
    }

    fn transport_failure(&mut self, action: &str, err: TransportError) -> io::Result<()> {
        debug!(action, error = %err, "request failed");
        self.log.record(&ClientError::Transport(err));
        self.console
            .say(&format!("Error {action} in the API. Check the log file for details."))
    }
}
