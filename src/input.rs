//! Scripted and interactive workload input.
//!
//! Input is a stream of whitespace-separated integers in prompt order:
//!
//! ```text
//! <job count>
//! <arrival> <cores> <memory GB> <duration>     (once per job)
//! <queue policy choice>                        (optional, 1-3)
//! <placement policy choice>                    (optional, 1-3)
//! ```
//!
//! Line breaks carry no meaning. Values stay signed until
//! [`crate::validation`] checks them.

use std::io::{BufRead, Write};

use crate::dispatching::QueuePolicyKind;
use crate::error::InputError;
use crate::models::JobSpec;
use crate::placement::PlacementPolicyKind;

/// Everything the input collaborator supplies for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptInput {
    /// Raw job parameters, in input order.
    pub jobs: Vec<JobSpec>,
    /// Queue policy menu choice, if given.
    pub queue_choice: Option<i64>,
    /// Placement policy menu choice, if given.
    pub placement_choice: Option<i64>,
}

impl ScriptInput {
    /// Queue policy for the given choice (FCFS if absent or unknown).
    pub fn queue_policy(&self) -> QueuePolicyKind {
        self.queue_choice
            .map(QueuePolicyKind::from_choice)
            .unwrap_or_default()
    }

    /// Placement policy for the given choice (first-fit if absent or unknown).
    pub fn placement_policy(&self) -> PlacementPolicyKind {
        self.placement_choice
            .map(PlacementPolicyKind::from_choice)
            .unwrap_or_default()
    }
}

/// Parses a complete script held in memory.
///
/// # Example
/// ```
/// use u_batchsim::input::parse_script;
///
/// let input = parse_script("1\n0 4 8 5\n2\n3\n").unwrap();
/// assert_eq!(input.jobs.len(), 1);
/// assert_eq!(input.queue_choice, Some(2));
/// assert_eq!(input.placement_choice, Some(3));
/// ```
pub fn parse_script(text: &str) -> Result<ScriptInput, InputError> {
    read_input(text.as_bytes(), std::io::sink())
}

/// Reads input from `reader`, writing each prompt to `prompts` before the
/// values it asks for are consumed.
///
/// Pass [`std::io::sink`] for non-interactive use.
pub fn read_input<R: BufRead, W: Write>(reader: R, mut prompts: W) -> Result<ScriptInput, InputError> {
    let mut tokens = Tokens::new(reader);

    write!(prompts, "Enter the number of jobs: ")?;
    prompts.flush()?;
    let count = tokens.require("job count")?;
    let count = usize::try_from(count).map_err(|_| InputError::NegativeJobCount(count))?;

    let mut jobs = Vec::with_capacity(count.min(1 << 16));
    for id in 1..=count {
        writeln!(
            prompts,
            "Enter arrival time, cores required, memory required (GB), and execution time (hours) for job {id}:"
        )?;
        prompts.flush()?;
        let arrival = tokens.require(&format!("arrival time of job {id}"))?;
        let cores = tokens.require(&format!("cores of job {id}"))?;
        let memory = tokens.require(&format!("memory of job {id}"))?;
        let duration = tokens.require(&format!("execution time of job {id}"))?;
        jobs.push(JobSpec::new(arrival, cores, memory, duration));
    }

    write!(prompts, "\nSelect Job Queue Policy:\n")?;
    for kind in QueuePolicyKind::ALL {
        writeln!(prompts, "{}. {}", kind.choice(), kind.label())?;
    }
    write!(prompts, "Choice: ")?;
    prompts.flush()?;
    let queue_choice = tokens.optional("queue policy choice")?;

    write!(prompts, "\nSelect Worker Node Selection Policy:\n")?;
    for kind in PlacementPolicyKind::ALL {
        writeln!(prompts, "{}. {}", kind.choice(), kind.label())?;
    }
    write!(prompts, "Choice: ")?;
    prompts.flush()?;
    let placement_choice = tokens.optional("placement policy choice")?;

    Ok(ScriptInput {
        jobs,
        queue_choice,
        placement_choice,
    })
}

/// Renders input in the format [`parse_script`] reads.
pub fn render_script(input: &ScriptInput) -> String {
    let mut out = format!("{}\n", input.jobs.len());
    for spec in &input.jobs {
        out.push_str(&format!(
            "{} {} {} {}\n",
            spec.arrival_time, spec.cores, spec.memory_gb, spec.duration
        ));
    }
    if let Some(choice) = input.queue_choice {
        out.push_str(&format!("{choice}\n"));
        if let Some(choice) = input.placement_choice {
            out.push_str(&format!("{choice}\n"));
        }
    }
    out
}

/// Lazily splits a reader into whitespace-separated tokens, one line at a
/// time, so interactive prompts interleave with typing.
struct Tokens<R> {
    reader: R,
    line: Vec<String>,
    eof: bool,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            eof: false,
        }
    }

    fn next_token(&mut self) -> Result<Option<String>, InputError> {
        while self.line.is_empty() {
            if self.eof {
                return Ok(None);
            }
            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                self.eof = true;
                return Ok(None);
            }
            // Reversed so pop() yields tokens in order.
            self.line = buf.split_whitespace().rev().map(str::to_owned).collect();
        }
        Ok(self.line.pop())
    }

    fn optional(&mut self, expected: &str) -> Result<Option<i64>, InputError> {
        match self.next_token()? {
            None => Ok(None),
            Some(token) => token
                .parse::<i64>()
                .map(Some)
                .map_err(|_| InputError::NotAnInteger {
                    expected: expected.to_owned(),
                    token,
                }),
        }
    }

    fn require(&mut self, expected: &str) -> Result<i64, InputError> {
        self.optional(expected)?
            .ok_or_else(|| InputError::MissingValue {
                expected: expected.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_script() {
        let input = parse_script("2\n0 4 8 5\n3 20 60 1\n2\n3\n").unwrap();
        assert_eq!(
            input.jobs,
            vec![JobSpec::new(0, 4, 8, 5), JobSpec::new(3, 20, 60, 1)]
        );
        assert_eq!(input.queue_policy(), QueuePolicyKind::SmallestJobFirst);
        assert_eq!(input.placement_policy(), PlacementPolicyKind::WorstFit);
    }

    #[test]
    fn test_layout_is_free_form() {
        let a = parse_script("1 0 4 8 5 1 1").unwrap();
        let b = parse_script("1\n0\n4\n8\n5\n\n1\n1\n").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_choices_use_defaults() {
        let input = parse_script("1\n0 4 8 5\n").unwrap();
        assert_eq!(input.queue_choice, None);
        assert_eq!(input.placement_choice, None);
        assert_eq!(input.queue_policy(), QueuePolicyKind::Fcfs);
        assert_eq!(input.placement_policy(), PlacementPolicyKind::FirstFit);
    }

    #[test]
    fn test_unknown_choices_fall_back() {
        let input = parse_script("0\n9\n-1\n").unwrap();
        assert_eq!(input.queue_policy(), QueuePolicyKind::Fcfs);
        assert_eq!(input.placement_policy(), PlacementPolicyKind::FirstFit);
    }

    #[test]
    fn test_negative_values_are_kept_for_validation() {
        let input = parse_script("1\n-2 0 -8 0\n").unwrap();
        assert_eq!(input.jobs[0], JobSpec::new(-2, 0, -8, 0));
    }

    #[test]
    fn test_truncated_job() {
        let err = parse_script("2\n0 4 8 5\n1 2\n").unwrap_err();
        match err {
            InputError::MissingValue { expected } => assert!(expected.contains("job 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_an_integer() {
        let err = parse_script("1\n0 four 8 5\n").unwrap_err();
        assert!(matches!(err, InputError::NotAnInteger { token, .. } if token == "four"));
    }

    #[test]
    fn test_negative_count() {
        assert!(matches!(
            parse_script("-1\n"),
            Err(InputError::NegativeJobCount(-1))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_script(""),
            Err(InputError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_prompts_follow_menu() {
        let mut prompts = Vec::new();
        read_input("1\n0 4 8 5\n1\n1\n".as_bytes(), &mut prompts).unwrap();
        let text = String::from_utf8(prompts).unwrap();
        assert!(text.starts_with("Enter the number of jobs: "));
        assert!(text.contains("for job 1:"));
        assert!(text.contains("2. Smallest Job First"));
        assert!(text.contains("3. Worst Fit"));
    }

    #[test]
    fn test_render_then_parse() {
        let input = ScriptInput {
            jobs: vec![JobSpec::new(0, 4, 8, 5), JobSpec::new(7, 1, 2, 3)],
            queue_choice: Some(3),
            placement_choice: Some(2),
        };
        assert_eq!(parse_script(&render_script(&input)).unwrap(), input);
    }
}
