use crate::domain::ports::RegistrationService;
use crate::utils::error::{LedgerError, RegistrationError, Result};
use crate::utils::money::{format_money, parse_amount};
use crate::utils::validation::is_valid_email;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    RegisterStudent,
    AddCourse,
    Enroll,
    Payment,
    ShowStudents,
    ShowCourses,
    CheckBalance,
    StudentsInCourse,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 9] = [
        MenuOption::RegisterStudent,
        MenuOption::AddCourse,
        MenuOption::Enroll,
        MenuOption::Payment,
        MenuOption::ShowStudents,
        MenuOption::ShowCourses,
        MenuOption::CheckBalance,
        MenuOption::StudentsInCourse,
        MenuOption::Exit,
    ];

    pub fn from_number(n: i64) -> Option<Self> {
        if (1..=9).contains(&n) {
            Some(Self::ALL[(n - 1) as usize])
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::RegisterStudent => "Register a student",
            MenuOption::AddCourse => "Add a course",
            MenuOption::Enroll => "Enroll a student in a course",
            MenuOption::Payment => "Calculate payment",
            MenuOption::ShowStudents => "Show registered students",
            MenuOption::ShowCourses => "Show courses",
            MenuOption::CheckBalance => "Check student balance",
            MenuOption::StudentsInCourse => "Show students in a course",
            MenuOption::Exit => "Exit",
        }
    }

    /// Parses the text typed at the option prompt. Integers too large for `i64` are out of range.
    pub fn parse(input: &str) -> std::result::Result<Self, SelectionError> {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(n) => Self::from_number(n).ok_or(SelectionError::OutOfRange),
            Err(_) => {
                let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
                if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                    Err(SelectionError::OutOfRange)
                } else {
                    Err(SelectionError::NotANumber)
                }
            }
        }
    }
}

/// Why a selection line is not a menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    NotANumber,
    OutOfRange,
}

enum Flow {
    Continue,
    Stop,
}

/// One line read from the input.
enum Line {
    Text(String),
    /// Not valid UTF-8.
    Garbled,
    Closed,
}

/// Why a prompt did not produce a usable value.
enum InputError {
    Eof,
    BadAmount,
    BadText,
    Io(LedgerError),
}

/// Line-oriented menu front-end. Reads from any `BufRead`, prints to any `Write`.
pub struct Menu<'a, S, R, W> {
    service: &'a mut S,
    input: R,
    output: W,
    currency: String,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
    S: RegistrationService,
    R: BufRead,
    W: Write,
{
    pub fn new(service: &'a mut S, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
            currency: "$".to_string(),
        }
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    /// Runs until option 9 or end of input. Only I/O failures surface as errors.
    pub fn run(&mut self) -> Result<()> {
        tracing::debug!("menu loop started");
        loop {
            self.print_menu()?;
            let line = match self.read_line("Please select an option (1-9): ")? {
                Line::Text(line) => line,
                Line::Garbled => {
                    writeln!(self.output, "Invalid option. Please enter a number.")?;
                    continue;
                }
                Line::Closed => {
                    tracing::debug!("input closed, leaving menu");
                    break;
                }
            };

            let option = match MenuOption::parse(&line) {
                Ok(option) => option,
                Err(SelectionError::NotANumber) => {
                    writeln!(self.output, "Invalid option. Please enter a number.")?;
                    continue;
                }
                Err(SelectionError::OutOfRange) => {
                    writeln!(
                        self.output,
                        "Invalid option. Please select a number between 1 and 9."
                    )?;
                    continue;
                }
            };

            tracing::debug!(?option, "menu option selected");
            match self.handle(option) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(InputError::Eof) => break,
                Err(InputError::BadAmount) => {
                    writeln!(self.output, "Invalid option. Please enter a valid amount.")?;
                }
                Err(InputError::BadText) => {
                    writeln!(self.output, "Invalid option. Please enter valid text.")?;
                }
                Err(InputError::Io(e)) => return Err(e),
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nWelcome! Please select an option:")?;
        for (i, option) in MenuOption::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option.label())?;
        }
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Line> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        // 以位元組讀取，非 UTF-8 的輸入視為無效選項而非 I/O 錯誤
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(Line::Closed);
        }
        match String::from_utf8(buf) {
            Ok(text) => Ok(Line::Text(text.trim().to_string())),
            Err(_) => {
                tracing::debug!("discarding input line that is not valid UTF-8");
                Ok(Line::Garbled)
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> std::result::Result<String, InputError> {
        match self.read_line(prompt) {
            Ok(Line::Text(value)) => Ok(value),
            Ok(Line::Garbled) => Err(InputError::BadText),
            Ok(Line::Closed) => Err(InputError::Eof),
            Err(e) => {
                tracing::error!("❌ Failed to read input: {}", e);
                Err(InputError::Io(e))
            }
        }
    }

    fn ask_amount(&mut self, prompt: &str) -> std::result::Result<Decimal, InputError> {
        let raw = self.ask(prompt)?;
        parse_amount(&raw, &self.currency).ok_or(InputError::BadAmount)
    }

    fn money(&self, amount: Decimal) -> String {
        format_money(amount, &self.currency)
    }

    fn say(&mut self, message: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            tracing::error!("❌ Failed to write output: {}", e);
        }
    }

    fn report(&mut self, err: RegistrationError) {
        self.say(format!("Error: {}", err));
    }

    fn handle(&mut self, option: MenuOption) -> std::result::Result<Flow, InputError> {
        match option {
            MenuOption::RegisterStudent => {
                let id = self.ask("Enter student ID: ")?;
                let name = self.ask("Enter student name: ")?;
                let email = self.ask("Enter student email: ")?;
                let outcome = self
                    .service
                    .register_student(&id, &name, &email)
                    .map(|_| ());
                match outcome {
                    Ok(()) => {
                        self.say("Student has been registered successfully.");
                        if !is_valid_email(&email) {
                            self.say(format!(
                                "Warning: {} does not look like an email address.",
                                email
                            ));
                        }
                    }
                    Err(e) => self.report(e),
                }
            }
            MenuOption::AddCourse => {
                let id = self.ask("Enter course ID: ")?;
                let name = self.ask("Enter course name: ")?;
                let cost = self.ask_amount("Enter course cost: ")?;
                let outcome = self.service.add_course(&id, &name, cost).map(|_| ());
                match outcome {
                    Ok(()) => self.say("Course has been added successfully."),
                    Err(e) => self.report(e),
                }
            }
            MenuOption::Enroll => {
                let student_id = self.ask("Enter student ID: ")?;
                let course_id = self.ask("Enter course ID: ")?;
                match self.service.enroll_in_course(&student_id, &course_id) {
                    Ok(receipt) => self.say(format!(
                        "{} is now enrolled in {}",
                        receipt.student_name, receipt.course_name
                    )),
                    Err(e) => self.report(e),
                }
            }
            MenuOption::Payment => {
                let student_id = self.ask("Enter student ID: ")?;
                let amount = self.ask_amount("Enter payment amount: ")?;
                match self.service.calculate_payment(&student_id, amount) {
                    Ok(remaining) => {
                        let message = format!(
                            "Payment of {} received. Remaining balance: {}.",
                            self.money(amount),
                            self.money(remaining)
                        );
                        self.say(message);
                    }
                    Err(e) => self.report(e),
                }
            }
            MenuOption::ShowStudents => self.show_students(),
            MenuOption::ShowCourses => self.show_courses(),
            MenuOption::CheckBalance => {
                let student_id = self.ask("Enter student ID: ")?;
                match self.service.check_balance(&student_id) {
                    Ok(balance) => {
                        let name = self
                            .service
                            .student(&student_id)
                            .map(|s| s.name().to_string())
                            .unwrap_or_else(|| student_id.clone());
                        let message = format!("Balance for {}: {}", name, self.money(balance));
                        self.say(message);
                    }
                    Err(e) => self.report(e),
                }
            }
            MenuOption::StudentsInCourse => {
                let course_id = self.ask("Enter course ID: ")?;
                self.show_students_in_course(&course_id);
            }
            MenuOption::Exit => {
                self.say("Exiting system. Goodbye!");
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    fn show_students(&mut self) {
        let lines: Vec<String> = self
            .service
            .list_students()
            .iter()
            .map(|s| format!("ID: {}, Name: {}, Email: {}", s.id(), s.name(), s.email()))
            .collect();
        if lines.is_empty() {
            self.say("No students registered. Please register a student to utilize this option.");
            return;
        }
        self.say("Registered students:");
        for line in lines {
            self.say(line);
        }
    }

    fn show_courses(&mut self) {
        let lines: Vec<String> = self
            .service
            .list_courses()
            .iter()
            .map(|c| {
                format!(
                    "ID: {}, Name: {}, Cost: {}",
                    c.id(),
                    c.name(),
                    format_money(c.cost(), &self.currency)
                )
            })
            .collect();
        if lines.is_empty() {
            self.say("No courses available. Please add a course before utilizing this option.");
            return;
        }
        self.say("Available courses:");
        for line in lines {
            self.say(line);
        }
    }

    fn show_students_in_course(&mut self, course_id: &str) {
        let names = match self.service.students_in_course(course_id) {
            Ok(names) => names,
            Err(e) => {
                self.report(e);
                return;
            }
        };
        let course_name = self
            .service
            .course(course_id)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| course_id.to_string());

        self.say(format!("Students enrolled in {}:", course_name));
        if names.is_empty() {
            self.say("No students are currently enrolled in this course.");
        } else {
            for name in names {
                self.say(format!("- {}", name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registration::RegistrationSystem;
    use std::io::Cursor;

    fn run_script(system: &mut RegistrationSystem, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(system, Cursor::new(script.to_string()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_option_numbers_map_to_menu_entries() {
        assert_eq!(MenuOption::from_number(1), Some(MenuOption::RegisterStudent));
        assert_eq!(MenuOption::from_number(9), Some(MenuOption::Exit));
        assert_eq!(MenuOption::from_number(0), None);
        assert_eq!(MenuOption::from_number(10), None);
    }

    #[test]
    fn test_menu_lists_all_nine_options() {
        let mut system = RegistrationSystem::new();
        let out = run_script(&mut system, "9\n");
        for (i, option) in MenuOption::ALL.iter().enumerate() {
            assert!(out.contains(&format!("{}. {}", i + 1, option.label())));
        }
        assert!(out.contains("Exiting system. Goodbye!"));
    }

    #[test]
    fn test_invalid_selections_do_not_stop_the_loop() {
        let mut system = RegistrationSystem::new();
        let out = run_script(&mut system, "abc\n42\n6\n9\n");
        assert!(out.contains("Invalid option. Please enter a number."));
        assert!(out.contains("Invalid option. Please select a number between 1 and 9."));
        assert!(out.contains("No courses available."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_bad_amount_is_reported_and_nothing_is_added() {
        let mut system = RegistrationSystem::new();
        let out = run_script(&mut system, "2\nC1\nMath\nlots\n9\n");
        assert!(out.contains("Invalid option. Please enter a valid amount."));
        assert!(system.list_courses().is_empty());
    }

    #[test]
    fn test_end_of_input_ends_the_session() {
        let mut system = RegistrationSystem::new();
        let out = run_script(&mut system, "1\nS1\n");
        assert!(!out.contains("Goodbye!"));
        assert!(system.list_students().is_empty());
    }

    fn run_bytes(system: &mut RegistrationSystem, script: &[u8]) -> String {
        let mut output = Vec::new();
        Menu::new(system, Cursor::new(script.to_vec()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(MenuOption::parse(" 3 "), Ok(MenuOption::Enroll));
        assert_eq!(MenuOption::parse("+9"), Ok(MenuOption::Exit));
        assert_eq!(MenuOption::parse("0"), Err(SelectionError::OutOfRange));
        assert_eq!(MenuOption::parse("-4"), Err(SelectionError::OutOfRange));
        assert_eq!(
            MenuOption::parse("99999999999999999999"),
            Err(SelectionError::OutOfRange)
        );
        assert_eq!(
            MenuOption::parse("-99999999999999999999"),
            Err(SelectionError::OutOfRange)
        );
        assert_eq!(MenuOption::parse("1.5"), Err(SelectionError::NotANumber));
        assert_eq!(MenuOption::parse("-"), Err(SelectionError::NotANumber));
        assert_eq!(MenuOption::parse(""), Err(SelectionError::NotANumber));
    }

    #[test]
    fn test_huge_selection_is_out_of_range() {
        let mut system = RegistrationSystem::new();
        let out = run_script(&mut system, "99999999999999999999\n9\n");
        assert!(out.contains("Invalid option. Please select a number between 1 and 9."));
        assert!(!out.contains("Please enter a number."));
    }

    #[test]
    fn test_non_utf8_selection_keeps_the_loop_running() {
        let mut system = RegistrationSystem::new();
        let mut script = vec![0xff, 0xfe, b'\n'];
        script.extend_from_slice(b"6\n9\n");

        let out = run_bytes(&mut system, &script);
        assert!(out.contains("Invalid option. Please enter a number."));
        assert!(out.contains("No courses available."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_non_utf8_field_is_rejected_and_loop_continues() {
        let mut system = RegistrationSystem::new();
        let mut script = b"1\nS1\n".to_vec();
        script.extend_from_slice(&[0xc3, 0x28, b'\n']);
        script.extend_from_slice(b"5\n9\n");

        let out = run_bytes(&mut system, &script);
        assert!(out.contains("Invalid option. Please enter valid text."));
        assert!(out.contains("No students registered."));
        assert!(out.contains("Goodbye!"));
        assert!(system.list_students().is_empty());
    }

    #[test]
    fn test_odd_email_registers_with_warning() {
        let mut system = RegistrationSystem::new();
        let out = run_script(&mut system, "1\nS1\nAda\nada\n9\n");
        assert!(out.contains("Student has been registered successfully."));
        assert!(out.contains("Warning: ada does not look like an email address."));
        assert_eq!(system.student("S1").unwrap().email(), "ada");
    }

    #[test]
    fn test_amount_uses_configured_currency_symbol() {
        let mut system = RegistrationSystem::new();
        let mut output = Vec::new();
        Menu::new(
            &mut system,
            Cursor::new("2\nC1\nMath\n€1,200\n2\nC2\nArt\n$50\n9\n"),
            &mut output,
        )
        .with_currency("€")
        .run()
        .unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Invalid option. Please enter a valid amount."));
        assert_eq!(system.course("C1").unwrap().cost(), rust_decimal_macros::dec!(1200));
        assert!(system.course("C2").is_none());
    }

    struct BrokenInput;

    impl std::io::Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_read_failure_surfaces_as_error() {
        let mut system = RegistrationSystem::new();
        let mut output = Vec::new();
        let result = Menu::new(
            &mut system,
            std::io::BufReader::new(BrokenInput),
            &mut output,
        )
        .run();
        assert!(matches!(result, Err(LedgerError::IoError(_))));
    }
}
