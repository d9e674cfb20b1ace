use crate::menu::Console;
use crate::models::{CreationError, LoginError, TransactionError};
use crate::session::SessionController;
use crate::storage::Storage;
use crate::types::Balance;
use std::io::{self, BufRead, Write};
use tracing::debug;

const BANNER: &str = "********************************************************************************";

/// Where the interactive loop currently is.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum MenuState {
    MainMenu,
    LoggingIn,
    CreatingAccount,
    Session(usize),
    Exiting
}

/// Reads a token or leaves the loop when input runs out.
macro_rules! prompt_or_exit {
    ($console:expr, $message:expr) => {
        match $console.prompt($message)? {
            Some(token) => token,
            None => return Ok(MenuState::Exiting)
        }
    };
}

/// Text front end over a `SessionController`. All validation outcomes come
/// back from the controller as typed errors; this layer only parses input
/// and turns results into messages.
pub struct MenuLoop<S: Storage, R: BufRead, W: Write> {
    controller: SessionController<S>,
    console: Console<R, W>
}

impl<S: Storage, R: BufRead, W: Write> MenuLoop<S, R, W> {
    pub fn new(controller: SessionController<S>, console: Console<R, W>) -> Self {
        Self {
            controller,
            console
        }
    }

    #[cfg(test)]
    pub fn into_controller(self) -> SessionController<S> {
        self.controller
    }

    /// Runs until the user exits or input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = MenuState::MainMenu;

        while state != MenuState::Exiting {
            debug!("Menu state: {state:?}");

            state = match state {
                MenuState::MainMenu => self.main_menu()?,
                MenuState::LoggingIn => self.login()?,
                MenuState::CreatingAccount => self.create_account()?,
                MenuState::Session(index) => self.session(index)?,
                MenuState::Exiting => MenuState::Exiting
            };
        }

        Ok(())
    }

    fn main_menu(&mut self) -> io::Result<MenuState> {
        self.console.clear()?;
        self.console.say(BANNER)?;
        self.console.say("                  WELCOME TO BANK MANAGEMENT SYSTEM")?;
        self.console.say(BANNER)?;
        self.console.say("1. LOGIN TO YOUR ACCOUNT")?;
        self.console.say("2. CREATE A NEW ACCOUNT")?;
        self.console.say("3. EXIT PROGRAM")?;

        let choice = prompt_or_exit!(self.console, "Enter your choice: ");

        match choice.parse::<u32>() {
            Ok(1) => Ok(MenuState::LoggingIn),
            Ok(2) => Ok(MenuState::CreatingAccount),
            Ok(3) => {
                self.console.say("Thank you for using Bank Management System!")?;
                Ok(MenuState::Exiting)
            }
            _ => {
                self.console.say("Invalid choice! Please enter 1-3.")?;
                Ok(MenuState::MainMenu)
            }
        }
    }

    fn login(&mut self) -> io::Result<MenuState> {
        let identifier = prompt_or_exit!(self.console, "Enter your CNIC: ");

        if self.controller.store().find(&identifier).is_none() {
            self.report_login(&LoginError::NotFound { identifier })?;
            return Ok(MenuState::MainMenu)
        }

        let password = prompt_or_exit!(self.console, "Enter your 4-digit password: ");

        let result = match password.parse::<u32>() {
            Ok(password) => self.controller.authenticate(&identifier, password),
            Err(_) => Err(LoginError::WrongPassword { identifier })
        };

        let index = match result {
            Ok(index) => index,
            Err(error) => {
                self.report_login(&error)?;
                return Ok(MenuState::MainMenu)
            }
        };

        if let Some(account) = self.controller.account(index) {
            self.console.say("Login successful!")?;
            self.console.say(format!("Welcome Back, {}", account.full_name()))?;
            self.console.say(format!("Your account number is: {}", account.identifier))?;
            self.console.say(format!("Your current balance is: {}", account.balance()))?;
        }

        Ok(MenuState::Session(index))
    }

    fn session(&mut self, index: usize) -> io::Result<MenuState> {
        self.console.say(format!("\n{BANNER}"))?;
        self.console.say("                                    SUB MENU")?;
        self.console.say(BANNER)?;
        self.console.say("1. Deposit Money")?;
        self.console.say("2. Withdraw Money")?;
        self.console.say("3. Check Balance / Account Info")?;
        self.console.say("4. Exit")?;

        let option = prompt_or_exit!(self.console, "Enter your option (1-4): ");

        match option.parse::<u32>() {
            Ok(1) => self.deposit(index),
            Ok(2) => self.withdraw(index),
            Ok(3) => self.check_balance(index),
            Ok(4) => {
                self.console.say("Thank you for using the system!")?;
                Ok(MenuState::MainMenu)
            }
            _ => {
                self.console.say("Invalid choice! Please enter 1-4.")?;
                Ok(MenuState::Session(index))
            }
        }
    }

    fn deposit(&mut self, index: usize) -> io::Result<MenuState> {
        let token = prompt_or_exit!(self.console, "Enter amount to deposit: ");

        let Ok(amount) = token.parse::<Balance>() else {
            self.console.say("Invalid amount!")?;
            return Ok(MenuState::Session(index))
        };

        let result = self.controller.deposit(index, amount);
        self.report_balance(index, "Deposit successful!", result)
    }

    fn withdraw(&mut self, index: usize) -> io::Result<MenuState> {
        let token = prompt_or_exit!(self.console, "Enter amount to withdraw: ");

        let Ok(amount) = token.parse::<Balance>() else {
            self.console.say("Invalid amount!")?;
            return Ok(MenuState::Session(index))
        };

        let result = self.controller.withdraw(index, amount);
        self.report_balance(index, "Withdrawal successful!", result)
    }

    /// Account details followed by the current balance.
    fn check_balance(&mut self, index: usize) -> io::Result<MenuState> {
        let balance = match self.controller.check_balance(index) {
            Ok(balance) => balance,
            Err(error) => return self.report_transaction(index, &error)
        };

        if let Some(account) = self.controller.account(index) {
            self.console.say(format!("Account holder: {}", account.full_name()))?;
            self.console.say(format!("Account number: {}", account.identifier))?;
        }

        self.console.say(format!("Current Balance: {balance}"))?;

        Ok(MenuState::Session(index))
    }

    fn report_balance(&mut self, index: usize, message: &str, result: Result<Balance, TransactionError>) -> io::Result<MenuState> {
        match result {
            Ok(balance) => {
                self.console.say(message)?;
                self.console.say(format!("Remaining Balance: {balance}"))?;
                Ok(MenuState::Session(index))
            }
            Err(error) => self.report_transaction(index, &error)
        }
    }

    fn create_account(&mut self) -> io::Result<MenuState> {
        if self.controller.store().is_full() {
            self.console.say("Cannot create more accounts, limit reached!")?;
            return Ok(MenuState::MainMenu)
        }

        let first_name = prompt_or_exit!(self.console, "Enter your Name (without spaces): ");
        let last_name = prompt_or_exit!(self.console, "Enter your Surname (without spaces): ");
        let identifier = prompt_or_exit!(self.console, "Enter your CNIC (without spaces): ");
        //NOTE: Collected for parity with the paper form, never stored
        let _phone_number = prompt_or_exit!(self.console, "Enter your Phone number (without spaces): ");

        loop {
            let password = prompt_or_exit!(self.console, "Enter your 4-digit Password: ");
            let confirm_password = prompt_or_exit!(self.console, "Confirm Password: ");

            let Ok(password) = password.parse::<u32>() else {
                self.console.say("Invalid password! It must be a 4-digit number.")?;
                continue;
            };

            let Ok(confirm_password) = confirm_password.parse::<u32>() else {
                self.console.say("Passwords do not match!")?;
                continue;
            };

            let result = self.controller
                .create_account(&identifier, &first_name, &last_name, password, confirm_password)
                .map(|_| ());

            match result {
                Ok(()) => {
                    self.console.say("Your account is created successfully!")?;
                    return Ok(MenuState::MainMenu)
                }
                Err(CreationError::CapacityExceeded { .. }) => {
                    self.console.say("Cannot create more accounts, limit reached!")?;
                    return Ok(MenuState::MainMenu)
                }
                Err(CreationError::PasswordInvalid(_)) => {
                    self.console.say("Invalid password! It must be a 4-digit number.")?;
                }
                Err(CreationError::PasswordMismatch { .. }) => {
                    self.console.say("Passwords do not match!")?;
                }
            }
        }
    }

    fn report_login(&mut self, error: &LoginError) -> io::Result<()> {
        match error {
            LoginError::NotFound { .. } => {
                self.console.say("Account not found! Please create an account or re-enter correct credentials.")
            }
            LoginError::WrongPassword { .. } => {
                self.console.say("Incorrect password! Please create an account or re-enter correct credentials.")
            }
        }
    }

    fn report_transaction(&mut self, index: usize, error: &TransactionError) -> io::Result<MenuState> {
        match error {
            TransactionError::InvalidAmount { .. } => self.console.say("Invalid amount!")?,
            TransactionError::LimitExceeded { limit, .. } => {
                self.console.say(format!("Amount exceeds withdrawal limit of {limit}!"))?
            }
            TransactionError::InsufficientFunds { .. } => self.console.say("Not enough balance!")?,
            TransactionError::UnknownAccount { .. } => {
                self.console.say("Account is no longer available!")?;
                return Ok(MenuState::MainMenu)
            }
        }

        Ok(MenuState::Session(index))
    }
}
