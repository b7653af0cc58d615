use chrono::NaiveDateTime;
use log::debug;

use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    ledger::Ledger,
    rupees::Rupees,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logical line of a report, before formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    Title(String),
    Timestamp(String),
    RegionHeader { region: u16 },
    Salesman { salesman: u16, revenue: Rupees },
    RegionTotal { region: u16, total: Rupees },
    PageFooter { page: u16, pages: u16 },
}

/// How a report is laid out.
///
/// Both styles show exactly the same lines and figures. [`Style::Decorated`]
/// is meant for the terminal and underlines the title and region headers;
/// [`Style::Plain`] is meant for files and has no emphasis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Decorated,
    Plain,
}

impl Style {
    fn title_width(self) -> usize {
        match self {
            Self::Decorated => 29,
            Self::Plain => 27,
        }
    }

    fn footer_indent(self) -> &'static str {
        match self {
            Self::Decorated => "\t\t\t\t\t",
            Self::Plain => "\t\t\t\t\t\t\t",
        }
    }

    fn rule_width(self) -> usize {
        match self {
            Self::Decorated => 98,
            Self::Plain => 97,
        }
    }

    fn write_line(self, f: &mut std::fmt::Formatter<'_>, line: &Line) -> std::fmt::Result {
        let plain = self == Self::Plain;
        match line {
            Line::Title(name) => {
                let width = self.title_width();
                writeln!(f, "{name:>width$}")?;
                if plain {
                    writeln!(f)
                } else {
                    writeln!(f, "{:>width$}", "-".repeat(name.chars().count()))
                }
            }
            Line::Timestamp(stamp) => {
                writeln!(f, "Current system date and time: {stamp}")?;
                writeln!(f)
            }
            Line::RegionHeader { region } => {
                let header = format!("Region {region}");
                writeln!(f, "{header}")?;
                if plain {
                    writeln!(f)?;
                } else {
                    writeln!(f, "{:-<1$}", "", header.len())?;
                }
                writeln!(f)
            }
            Line::Salesman { salesman, revenue } => {
                writeln!(f, "Salesman {salesman}\t\t\t\t\t{revenue}")?;
                let blank_lines = if plain { 3 } else { 1 };
                for _ in 0..blank_lines {
                    writeln!(f)?;
                }
                Ok(())
            }
            Line::RegionTotal { region, total } => {
                writeln!(f, "Total sale at Region {region}\t\t{total}")?;
                writeln!(f)
            }
            Line::PageFooter { page, pages } => {
                writeln!(f, "{} Page : {page} / {pages}", self.footer_indent())?;
                writeln!(f)?;
                writeln!(f, "{:=<1$}", "", self.rule_width())?;
                writeln!(f)
            }
        }
    }
}

/// A paged revenue report, one page per region.
///
/// To build a report from a [`Ledger`], use [`Report::render`].
///
/// To get printable text, use [`Report::styled`], or write it to one or more
/// [`Sink`]s with [`Report::emit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    lines: Vec<Line>,
}

impl Report {
    /// Lays out `ledger` as a report headed by `company` and `timestamp`.
    ///
    /// The title and timestamp come first. Then, for each region in
    /// ascending order: a region header, one line per salesman in ascending
    /// order, the region total, and a page footer.
    #[must_use]
    pub fn render(ledger: &Ledger, company: &str, timestamp: NaiveDateTime) -> Self {
        let pages = ledger.regions();
        let mut lines = vec![
            Line::Title(company.to_string()),
            Line::Timestamp(timestamp.format(TIMESTAMP_FORMAT).to_string()),
        ];
        for region in 1..=pages {
            lines.push(Line::RegionHeader { region });
            for salesman in 1..=ledger.salesmen() {
                lines.push(Line::Salesman {
                    salesman,
                    revenue: ledger.get(region, salesman).unwrap_or_default(),
                });
            }
            lines.push(Line::RegionTotal {
                region,
                total: ledger.region_total(region).unwrap_or_default(),
            });
            lines.push(Line::PageFooter {
                page: region,
                pages,
            });
        }
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns a [`Display`] adapter that formats the report in `style`.
    #[must_use]
    pub fn styled(&self, style: Style) -> Styled<'_> {
        Styled {
            report: self,
            style,
        }
    }

    /// Writes the report to every sink, each in its own style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkWrite`] for the first sink that fails. Sinks
    /// after it are not written.
    pub fn emit(&self, sinks: &mut [Sink<'_>]) -> Result<()> {
        for sink in sinks {
            sink.write(self)?;
        }
        Ok(())
    }
}

/// A [`Report`] formatted in a particular [`Style`].
pub struct Styled<'a> {
    report: &'a Report,
    style: Style,
}

impl Display for Styled<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.report.lines {
            self.style.write_line(f, line)?;
        }
        Ok(())
    }
}

/// A named destination for report text.
pub struct Sink<'a> {
    name: String,
    style: Style,
    writer: Box<dyn Write + 'a>,
}

impl<'a> Sink<'a> {
    pub fn new(name: impl Into<String>, style: Style, writer: impl Write + 'a) -> Self {
        Self {
            name: name.into(),
            style,
            writer: Box::new(writer),
        }
    }

    fn write(&mut self, report: &Report) -> Result<()> {
        let text = report.styled(self.style).to_string();
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|source| Error::SinkWrite {
                sink: self.name.clone(),
                source,
            })?;
        debug!("wrote {} bytes to {}", text.len(), self.name);
        Ok(())
    }
}

impl Sink<'static> {
    /// Creates a file sink at `path` in the plain style, truncating any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkWrite`] if the file cannot be created.
    pub fn create_file(path: impl AsRef<Path>) -> Result<Sink<'static>> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::create(path).map_err(|source| Error::SinkWrite {
            sink: name.clone(),
            source,
        })?;
        Ok(Sink::new(name, Style::Plain, BufWriter::new(file)))
    }

    /// Creates a sink for the terminal, in the decorated style.
    #[must_use]
    pub fn stdout() -> Self {
        Sink::new("standard output", Style::Decorated, io::stdout())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{aggregate, Catalog, Record};

    use super::*;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    fn ledger(lines: &[&str], regions: u16, salesmen: u16) -> Ledger {
        let records: Vec<Record> = lines.iter().map(|line| line.parse().unwrap()).collect();
        aggregate(&records, &Catalog::standard(), regions, salesmen).unwrap()
    }

    #[test]
    fn render_fn_orders_lines_by_region_then_salesman() {
        let ledger = ledger(&["2,1,12345678A,2"], 2, 2);
        let report = Report::render(&ledger, "ABC Company", timestamp());
        assert_eq!(
            report.lines(),
            [
                Line::Title("ABC Company".into()),
                Line::Timestamp("2024-03-09 14:05:00".into()),
                Line::RegionHeader { region: 1 },
                Line::Salesman { salesman: 1, revenue: Rupees::ZERO },
                Line::Salesman { salesman: 2, revenue: Rupees::ZERO },
                Line::RegionTotal { region: 1, total: Rupees::ZERO },
                Line::PageFooter { page: 1, pages: 2 },
                Line::RegionHeader { region: 2 },
                Line::Salesman { salesman: 1, revenue: Rupees::new(100) },
                Line::Salesman { salesman: 2, revenue: Rupees::ZERO },
                Line::RegionTotal { region: 2, total: Rupees::new(100) },
                Line::PageFooter { page: 2, pages: 2 },
            ]
        );
    }

    #[test]
    fn plain_style_matches_file_layout() {
        let ledger = ledger(&["1,2,12345678A,3"], 1, 2);
        let report = Report::render(&ledger, "ABC Company", timestamp());
        let want = [
            "                ABC Company\n",
            "\n",
            "Current system date and time: 2024-03-09 14:05:00\n",
            "\n",
            "Region 1\n",
            "\n",
            "\n",
            "Salesman 1\t\t\t\t\tRs.0/-\n",
            "\n\n\n",
            "Salesman 2\t\t\t\t\tRs.150/-\n",
            "\n\n\n",
            "Total sale at Region 1\t\tRs.150/-\n",
            "\n",
            "\t\t\t\t\t\t\t Page : 1 / 1\n",
            "\n",
            &"=".repeat(97),
            "\n\n",
        ]
        .concat();
        assert_eq!(report.styled(Style::Plain).to_string(), want);
    }

    #[test]
    fn decorated_style_underlines_title_and_region_headers() {
        let report = Report::render(&ledger(&[], 1, 1), "ABC Company", timestamp());
        let want = [
            "                  ABC Company\n",
            "                  -----------\n",
            "Current system date and time: 2024-03-09 14:05:00\n",
            "\n",
            "Region 1\n",
            "--------\n",
            "\n",
            "Salesman 1\t\t\t\t\tRs.0/-\n",
            "\n",
            "Total sale at Region 1\t\tRs.0/-\n",
            "\n",
            "\t\t\t\t\t Page : 1 / 1\n",
            "\n",
            &"=".repeat(98),
            "\n\n",
        ]
        .concat();
        assert_eq!(report.styled(Style::Decorated).to_string(), want);
    }

    #[test]
    fn both_styles_carry_the_same_figures() {
        let report = Report::render(
            &ledger(&["2,5,54326778B,1", "2,5,76579940F,2", "4,6,74526829H,1"], 4, 6),
            "ABC Company",
            timestamp(),
        );
        let figures = |text: String| -> Vec<String> {
            text.lines()
                .filter(|line| line.contains("Rs.") || line.contains("Page :"))
                .map(|line| line.trim().to_string())
                .collect()
        };
        let decorated = figures(report.styled(Style::Decorated).to_string());
        assert_eq!(decorated, figures(report.styled(Style::Plain).to_string()));
        assert!(decorated.contains(&"Salesman 5\t\t\t\t\tRs.400/-".to_string()));
        assert!(decorated.contains(&"Page : 4 / 4".to_string()));
    }

    #[test]
    fn emit_fn_writes_each_sink_in_its_style() {
        let ledger = ledger(&["1,1,12345678A,1"], 1, 1);
        let report = Report::render(&ledger, "ABC Company", timestamp());
        let mut screen = Vec::new();
        let mut file = Vec::new();
        {
            let mut sinks = [
                Sink::new("screen", Style::Decorated, &mut screen),
                Sink::new("file", Style::Plain, &mut file),
            ];
            report.emit(&mut sinks).unwrap();
        }
        assert_eq!(
            String::from_utf8(screen).unwrap(),
            report.styled(Style::Decorated).to_string()
        );
        assert_eq!(
            String::from_utf8(file).unwrap(),
            report.styled(Style::Plain).to_string()
        );
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn emit_fn_returns_sink_write_error() {
        let report = Report::render(&Ledger::new(1, 1), "ABC Company", timestamp());
        let mut sinks = [Sink::new("broken", Style::Plain, Broken)];
        assert!(matches!(
            report.emit(&mut sinks),
            Err(Error::SinkWrite { sink, .. }) if sink == "broken"
        ));
    }
}
