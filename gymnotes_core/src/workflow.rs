//! Interactive session state machine.
//!
//! A session moves through these steps:
//!
//! ```text
//! Start -> CreateUser ------------------------------> CreateWorkout -> Done
//!       -> LoginExisting -> [ManageData] -> ChooseWorkout -> CreateWorkout -> Done
//!                                                        -> (load existing) -> Done
//! ```
//!
//! Bad input is handled inside the prompt that received it. Lookup misses end
//! the current operation with a message. Gateway errors end the session.

use crate::error::Result;
use crate::gateway::{Rows, TableGateway};
use crate::menus::FeatureMenus;
use crate::prompt::Console;
use crate::types::*;
use std::io::{BufRead, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Start,
    CreateUser,
    LoginExisting,
    ManageData,
    ChooseWorkout,
    CreateWorkout,
    Done,
}

/// Entries of the data-management menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ManageAction {
    ReadUsers,
    UpdateUser,
    DeleteUser,
    ReadWorkouts,
    DeleteWorkout,
    DeleteAllWorkouts,
    Continue,
}

impl ManageAction {
    const ALL: [ManageAction; 7] = [
        ManageAction::ReadUsers,
        ManageAction::UpdateUser,
        ManageAction::DeleteUser,
        ManageAction::ReadWorkouts,
        ManageAction::DeleteWorkout,
        ManageAction::DeleteAllWorkouts,
        ManageAction::Continue,
    ];

    fn label(self) -> &'static str {
        match self {
            ManageAction::ReadUsers => "Read all users",
            ManageAction::UpdateUser => "Update a user",
            ManageAction::DeleteUser => "Delete a user",
            ManageAction::ReadWorkouts => "Read all workouts",
            ManageAction::DeleteWorkout => "Delete a workout",
            ManageAction::DeleteAllWorkouts => "Delete all workouts",
            ManageAction::Continue => "Continue to workouts",
        }
    }
}

/// What a finished session wrote
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub created_user: Option<UserRecord>,
    pub created_workout: Option<WorkoutFeatureRecord>,
}

/// Drives one interactive session against a table gateway
pub struct Workflow<G, R, W> {
    gateway: G,
    console: Console<R, W>,
    menus: FeatureMenus,
}

impl<G: TableGateway, R: BufRead, W: Write> Workflow<G, R, W> {
    pub fn new(gateway: G, console: Console<R, W>, menus: FeatureMenus) -> Self {
        Self {
            gateway,
            console,
            menus,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn into_parts(self) -> (G, Console<R, W>) {
        (self.gateway, self.console)
    }

    /// Run the session from the start menu to its natural end
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut step = Step::Start;

        loop {
            tracing::debug!(?step, "Entering workflow step");
            step = match step {
                Step::Start => self.start()?,
                Step::CreateUser => {
                    summary.created_user = Some(self.create_user()?);
                    Step::CreateWorkout
                }
                Step::LoginExisting => self.login()?,
                Step::ManageData => self.manage_data()?,
                Step::ChooseWorkout => self.choose_workout()?,
                Step::CreateWorkout => {
                    summary.created_workout = Some(self.create_workout()?);
                    Step::Done
                }
                Step::Done => break,
            };
        }

        self.console.say("\nThank you for using Gym Notes!")?;
        Ok(summary)
    }

    fn start(&mut self) -> Result<Step> {
        self.console.say("Welcome to Gym Notes!\n")?;
        let choice = self.console.select_index(
            "Are you a new user or an existing one?",
            &["Create a new user", "Log in as an existing user"],
        )?;
        Ok(if choice == 0 {
            Step::CreateUser
        } else {
            Step::LoginExisting
        })
    }

    // "Log in" checks nothing: any existing-user selection is accepted.
    fn login(&mut self) -> Result<Step> {
        self.console.say("Logged in.\n")?;
        let choice = self.console.select_index(
            "Would you like to manage the stored data first?",
            &["Manage stored data", "Continue to workouts"],
        )?;
        Ok(if choice == 0 {
            Step::ManageData
        } else {
            Step::ChooseWorkout
        })
    }

    fn manage_data(&mut self) -> Result<Step> {
        let labels = ManageAction::ALL.map(ManageAction::label);

        loop {
            let index = self.console.select_index("\nWhat would you like to do?", &labels)?;
            match ManageAction::ALL[index] {
                ManageAction::ReadUsers => {
                    self.read_users()?;
                }
                ManageAction::UpdateUser => {
                    self.update_user()?;
                }
                ManageAction::DeleteUser => {
                    self.delete_user()?;
                }
                ManageAction::ReadWorkouts => {
                    self.read_workouts()?;
                }
                ManageAction::DeleteWorkout => {
                    self.delete_workout()?;
                }
                ManageAction::DeleteAllWorkouts => {
                    self.delete_all_workouts()?;
                }
                ManageAction::Continue => return Ok(Step::ChooseWorkout),
            }
        }
    }

    fn choose_workout(&mut self) -> Result<Step> {
        let choice = self.console.select_index(
            "\nWould you like to load your workout or create a new one?",
            &["Load existing features", "Create new features"],
        )?;
        if choice == 0 {
            self.read_workouts()?;
            Ok(Step::Done)
        } else {
            Ok(Step::CreateWorkout)
        }
    }

    /// Collect a new user and append it to the user table
    pub fn create_user(&mut self) -> Result<UserRecord> {
        self.console
            .say("Please enter the details required to create a new user.")?;
        self.print_user_format()?;

        let user = self.collect_user("Enter your details here: ")?;
        self.ensure_user_header()?;
        self.gateway.append_row(USER_TABLE, &user.to_row())?;

        tracing::info!("Created user {}", user.email());
        self.console.say("User created.")?;
        Ok(user)
    }

    /// Pick one option from every feature menu and append the row
    pub fn create_workout(&mut self) -> Result<WorkoutFeatureRecord> {
        self.console.say("\nLet's put together your workout.")?;

        let mut picks: [String; 5] = Default::default();
        for (pick, (prompt, options)) in picks.iter_mut().zip(self.menus.steps()) {
            *pick = self.console.select(prompt, options)?.to_string();
        }

        let [exercise, weight, reps, rest_time, period] = picks;
        let record = WorkoutFeatureRecord {
            exercise,
            weight,
            reps,
            rest_time,
            period,
        };

        self.ensure_features_header()?;
        let row = record.to_row();
        self.gateway.append_row(FEATURES_TABLE, &row)?;

        tracing::info!("Saved workout {:?}", row);
        self.console
            .say(format_args!("Workout saved: {}", row.join(", ")))?;
        Ok(record)
    }

    /// Print every user record; returns how many there were
    pub fn read_users(&mut self) -> Result<usize> {
        let records = self.gateway.get_all_records(USER_TABLE)?;
        if records.is_empty() {
            self.console.say("No users stored yet.")?;
            return Ok(0);
        }

        for (i, record) in records.iter().enumerate() {
            let line = record
                .iter()
                .map(|(column, value)| format!("{}: {}", column, value))
                .collect::<Vec<_>>()
                .join(", ");
            self.console.say(format_args!("{}. {}", i + 1, line))?;
        }
        Ok(records.len())
    }

    /// Overwrite the row of the user with a given e-mail; false if not found
    pub fn update_user(&mut self) -> Result<bool> {
        let email = self.console.ask("Enter the e-mail of the user to update: ")?;
        if self.find_user_row(&email)?.is_none() {
            return self.user_not_found(&email);
        }

        self.console.say("Enter the new details for this user.")?;
        self.print_user_format()?;
        let user = self.collect_user("New details: ")?;

        // The table may have changed while the operator was typing.
        let Some(row) = self.find_user_row(&email)? else {
            return self.user_not_found(&email);
        };

        for (i, value) in user.to_row().iter().enumerate() {
            self.gateway.update_cell(USER_TABLE, row, i + 1, value)?;
        }

        tracing::info!("Updated user row {} ({} -> {})", row, email, user.email());
        self.console.say("User updated.")?;
        Ok(true)
    }

    /// Remove the row of the user with a given e-mail; false if not found
    pub fn delete_user(&mut self) -> Result<bool> {
        let email = self.console.ask("Enter the e-mail of the user to delete: ")?;
        let Some(row) = self.find_user_row(&email)? else {
            return self.user_not_found(&email);
        };

        self.gateway.delete_row(USER_TABLE, row)?;
        tracing::info!("Deleted user row {} ({})", row, email);
        self.console.say(format_args!("User {} deleted.", email))?;
        Ok(true)
    }

    /// Print stored workouts numbered from 1; returns how many there were
    pub fn read_workouts(&mut self) -> Result<usize> {
        let workouts = self.workout_rows()?;
        if workouts.is_empty() {
            self.console.say("No workouts stored yet.")?;
            return Ok(0);
        }

        self.console.say("Stored workouts:")?;
        for (i, row) in workouts.iter().enumerate() {
            self.console
                .say(format_args!("  {}. {}", i + 1, row.join(", ")))?;
        }
        Ok(workouts.len())
    }

    /// Delete one workout by its position in the listing; false if out of range
    pub fn delete_workout(&mut self) -> Result<bool> {
        let count = self.read_workouts()?;
        if count == 0 {
            return Ok(false);
        }

        let position = loop {
            let answer = self.console.ask("Enter the number of the workout to delete: ")?;
            match answer.parse::<usize>() {
                Ok(n) => break n,
                Err(_) => self
                    .console
                    .say(format_args!("{:?} is not a number, please try again.", answer))?,
            }
        };

        if position == 0 || position > count {
            tracing::debug!("Workout position {} out of range (1..={})", position, count);
            self.console
                .say(format_args!("There is no workout number {}.", position))?;
            return Ok(false);
        }

        self.gateway
            .delete_row(FEATURES_TABLE, position + FEATURES_RESERVED_ROWS)?;
        self.console
            .say(format_args!("Workout {} deleted.", position))?;
        Ok(true)
    }

    /// Remove every workout, keeping the reserved rows; false if cancelled
    pub fn delete_all_workouts(&mut self) -> Result<bool> {
        let choice = self
            .console
            .select_index("Delete ALL stored workouts?", &["Yes", "No"])?;
        if choice != 0 {
            self.console.say("Nothing deleted.")?;
            return Ok(false);
        }

        self.gateway.clear(FEATURES_TABLE)?;
        self.ensure_features_header()?;
        tracing::info!("Cleared all workouts");
        self.console.say("All workouts deleted.")?;
        Ok(true)
    }

    fn print_user_format(&mut self) -> Result<()> {
        self.console
            .say("Insert the data in this order, separated by commas:")?;
        self.console
            .say("name,surname,age,gender,weight(kg),height(cm),e-mail")?;
        self.console
            .say("Example: Jane,Doe,30,female,65.5,170,jane@x.com\n")
    }

    fn collect_user(&mut self, prompt: &str) -> Result<UserRecord> {
        loop {
            let fields = self.console.collect_record(prompt, &USER_SCHEMA)?;
            match UserRecord::from_fields(&fields) {
                Ok(user) => return Ok(user),
                Err(e) => self
                    .console
                    .say(format_args!("Invalid data: {}, please try again.\n", e))?,
            }
        }
    }

    fn user_not_found(&mut self, email: &str) -> Result<bool> {
        tracing::debug!("No user row matches {:?}", email);
        self.console
            .say(format_args!("User with e-mail {} not found.", email))?;
        Ok(false)
    }

    /// 1-based row of the first user whose e-mail cell equals `email`
    fn find_user_row(&self, email: &str) -> Result<Option<usize>> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(None);
        }

        let rows = self.gateway.get_all_rows(USER_TABLE)?;
        Ok(rows
            .iter()
            .position(|row| {
                !is_user_header(row)
                    && row.get(USER_EMAIL_COLUMN - 1).map(|c| c.trim()) == Some(email)
            })
            .map(|i| i + 1))
    }

    fn workout_rows(&self) -> Result<Rows> {
        let rows = self.gateway.get_all_rows(FEATURES_TABLE)?;
        Ok(rows.into_iter().skip(FEATURES_RESERVED_ROWS).collect())
    }

    fn ensure_user_header(&mut self) -> Result<()> {
        if self.gateway.get_all_rows(USER_TABLE)?.is_empty() {
            self.gateway
                .append_row(USER_TABLE, &header_row(&USER_HEADER))?;
        }
        Ok(())
    }

    /// Fill in whichever reserved rows are missing so data starts at row 3
    fn ensure_features_header(&mut self) -> Result<()> {
        let present = self.gateway.get_all_rows(FEATURES_TABLE)?.len();
        let reserved: [&[&str]; FEATURES_RESERVED_ROWS] = [&FEATURES_TITLE, &FEATURES_HEADER];
        for cells in reserved.into_iter().skip(present) {
            self.gateway.append_row(FEATURES_TABLE, &header_row(cells))?;
        }
        Ok(())
    }
}

fn is_user_header(row: &[String]) -> bool {
    row.len() >= USER_HEADER.len() && row.iter().zip(USER_HEADER).all(|(cell, name)| cell == name)
}
