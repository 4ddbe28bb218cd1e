use crate::contact::Contact;
use crate::reminder::Verdict;
use anyhow::Context;
use colorful::Colorful;
use notify_rust::{Notification, Timeout};
use std::io::{self, IsTerminal};
use tracing::debug;

const POPUP_TITLE: &str = "Hey, remember me?";
const POPUP_ICON: &str = "stock_person";

/// Where verdicts are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reporter {
    /// Lines on stderr. Contacts which are not due are only listed when
    /// verbose.
    Terminal { colour: bool, verbose: bool },
    /// Desktop notification popups.
    Popup { hyperlinks: bool },
}

impl Reporter {
    /// `colour` of `None` colours output only when stderr is a terminal.
    pub fn terminal(colour: Option<bool>, verbose: bool) -> Self {
        Reporter::Terminal {
            colour: colour.unwrap_or_else(|| io::stderr().is_terminal()),
            verbose,
        }
    }

    pub fn popup() -> Self {
        Reporter::Popup {
            hyperlinks: server_supports_hyperlinks(),
        }
    }

    pub fn report(&self, contact: &Contact, verdict: Verdict) -> anyhow::Result<()> {
        debug!(contact = %contact, ?verdict, "classified");
        match *self {
            Reporter::Terminal { .. } => {
                if let Some(line) = self.render(contact, verdict) {
                    eprintln!("{}", line);
                }
                Ok(())
            }
            Reporter::Popup { hyperlinks } => show_popup(contact, verdict, hyperlinks),
        }
    }

    /// Terminal line for a verdict, if it is shown at all.
    fn render(&self, contact: &Contact, verdict: Verdict) -> Option<String> {
        let (colour, verbose) = match *self {
            Reporter::Terminal { colour, verbose } => (colour, verbose),
            Reporter::Popup { .. } => return None,
        };
        let name = &contact.name;
        let line = match verdict {
            Verdict::NoRecord => {
                let text = format!("No mail record for {}", name);
                if colour {
                    text.light_yellow().to_string()
                } else {
                    text
                }
            }
            Verdict::Due { .. } => {
                let text = format!("Mail due for {}", name);
                if colour {
                    text.light_red().to_string()
                } else {
                    text
                }
            }
            Verdict::NotDue { trigger } if verbose => {
                format!("Mail not due for {} until {}", name, trigger)
            }
            Verdict::NotDue { .. } => return None,
        };
        Some(line)
    }
}

/// Name as shown in a popup body, a `mailto:` link when supported.
fn popup_name(contact: &Contact, hyperlinks: bool) -> String {
    match contact.addresses.first() {
        Some(address) if hyperlinks => {
            format!("<a href='mailto:{}'>{}</a>", address, contact.name)
        }
        _ => contact.name.clone(),
    }
}

fn show_popup(contact: &Contact, verdict: Verdict, hyperlinks: bool) -> anyhow::Result<()> {
    let name = popup_name(contact, hyperlinks);
    let (body, urgent) = match verdict {
        Verdict::NoRecord => (format!("No mail record for {}", name), false),
        Verdict::Due { .. } => (format!("Mail due for {}", name), true),
        Verdict::NotDue { .. } => return Ok(()),
    };

    let mut note = Notification::new();
    note.summary(POPUP_TITLE)
        .body(&body)
        .icon(POPUP_ICON)
        .timeout(if urgent {
            Timeout::Never
        } else {
            Timeout::Default
        });
    #[cfg(all(unix, not(target_os = "macos")))]
    note.urgency(if urgent {
        notify_rust::Urgency::Critical
    } else {
        notify_rust::Urgency::Normal
    });
    note.show().context("Notification failed to display!")?;
    Ok(())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn server_supports_hyperlinks() -> bool {
    notify_rust::get_capabilities()
        .map(|caps| caps.iter().any(|cap| cap == "body-hyperlinks"))
        .unwrap_or(false)
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn server_supports_hyperlinks() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn contact() -> Contact {
        Contact::new("James Rowe", &["jnrowe@gmail.com"], 200)
    }

    fn trigger() -> NaiveDate {
        NaiveDate::from_ymd_opt(1942, 7, 20).unwrap()
    }

    #[test]
    fn test_render_plain() {
        let reporter = Reporter::terminal(Some(false), false);
        assert_eq!(
            reporter.render(&contact(), Verdict::NoRecord).as_deref(),
            Some("No mail record for James Rowe")
        );
        assert_eq!(
            reporter
                .render(&contact(), Verdict::Due { trigger: trigger() })
                .as_deref(),
            Some("Mail due for James Rowe")
        );
        assert_eq!(
            reporter.render(&contact(), Verdict::NotDue { trigger: trigger() }),
            None
        );
    }

    #[test]
    fn test_render_verbose() {
        let reporter = Reporter::terminal(Some(false), true);
        assert_eq!(
            reporter
                .render(&contact(), Verdict::NotDue { trigger: trigger() })
                .as_deref(),
            Some("Mail not due for James Rowe until 1942-07-20")
        );
    }

    #[test]
    fn test_render_colour() {
        let reporter = Reporter::terminal(Some(true), false);
        let line = reporter.render(&contact(), Verdict::NoRecord).unwrap();
        assert!(line.contains("No mail record for James Rowe"));
    }

    #[test]
    fn test_popup_name() {
        assert_eq!(popup_name(&contact(), false), "James Rowe");
        assert_eq!(
            popup_name(&contact(), true),
            "<a href='mailto:jnrowe@gmail.com'>James Rowe</a>"
        );
    }
}
