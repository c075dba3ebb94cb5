//! Row rendering for stdout. CSV for spreadsheets and plotting scripts, JSON
//! for anything that wants typed values.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use w2v_math::subsampling::{Decision, Score};
use w2v_math::sweep::{SigmoidPoint, SubsamplingPoint};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

/// A record that can be written as one CSV line.
pub trait CsvRow {
    const HEADER: &'static str;
    fn to_csv(&self) -> String;
}

#[derive(Debug, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub x: f64,
    pub value: f64,
}

impl CsvRow for TableRow {
    const HEADER: &'static str = "index,x,value";
    fn to_csv(&self) -> String {
        format!("{},{},{}", self.index, self.x, self.value)
    }
}

#[derive(Debug, Serialize)]
pub struct LookupRow {
    pub x: f64,
    pub bucket: usize,
    pub approx: f64,
    pub exact: f64,
}

impl CsvRow for LookupRow {
    const HEADER: &'static str = "x,bucket,approx,exact";
    fn to_csv(&self) -> String {
        format!("{},{},{},{}", self.x, self.bucket, self.approx, self.exact)
    }
}

#[derive(Debug, Serialize)]
pub struct DecisionRow {
    pub freq: f64,
    pub ratio: f64,
    pub state: u64,
    pub draw: u16,
    pub decision: Decision,
}

impl CsvRow for DecisionRow {
    const HEADER: &'static str = "freq,ratio,state,draw,decision";
    fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.freq,
            self.ratio,
            self.state,
            self.draw,
            decision_str(self.decision)
        )
    }
}

impl CsvRow for SigmoidPoint {
    const HEADER: &'static str = "x,approx,exact";
    fn to_csv(&self) -> String {
        format!("{},{},{}", self.x, self.approx, self.exact)
    }
}

impl CsvRow for SubsamplingPoint {
    const HEADER: &'static str = "freq,sampling_rate,mode,score";
    fn to_csv(&self) -> String {
        let score = match self.score {
            Score::Probability(p) => p.to_string(),
            Score::Decision(d) => decision_str(d).to_string(),
        };
        format!("{},{},{},{}", self.freq, self.sampling_rate, self.mode, score)
    }
}

fn decision_str(d: Decision) -> &'static str {
    match d {
        Decision::Keep => "keep",
        Decision::Discard => "discard",
    }
}

/// Write `rows` to `out` in `format`.
pub fn write_rows<W, T>(out: &mut W, format: Format, rows: &[T]) -> Result<()>
where
    W: Write,
    T: CsvRow + Serialize,
{
    match format {
        Format::Csv => {
            writeln!(out, "{}", T::HEADER)?;
            for row in rows {
                writeln!(out, "{}", row.to_csv())?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use w2v_math::subsampling::SubsamplingMode;

    fn render<T: CsvRow + Serialize>(format: Format, rows: &[T]) -> String {
        let mut buf = Vec::new();
        write_rows(&mut buf, format, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_has_header_and_rows() {
        let rows = [
            TableRow { index: 0, x: -6.0, value: 0.25 },
            TableRow { index: 1, x: 0.0, value: 0.5 },
        ];
        assert_eq!(render(Format::Csv, &rows), "index,x,value\n0,-6,0.25\n1,0,0.5\n");
    }

    #[test]
    fn json_is_an_array() {
        let rows = [DecisionRow {
            freq: 0.5,
            ratio: 0.25,
            state: 7,
            draw: 7,
            decision: Decision::Discard,
        }];
        let v: serde_json::Value = serde_json::from_str(&render(Format::Json, &rows)).unwrap();
        assert_eq!(v[0]["decision"], "discard");
        assert_eq!(v[0]["state"], 7);
    }

    #[test]
    fn subsampling_csv_renders_decisions_as_words() {
        let rows = [SubsamplingPoint {
            freq: 0.001,
            sampling_rate: 0.001,
            mode: SubsamplingMode::RandomDecision,
            score: Score::Decision(Decision::Keep),
        }];
        assert_eq!(
            render(Format::Csv, &rows),
            "freq,sampling_rate,mode,score\n0.001,0.001,random,keep\n"
        );
    }

    #[test]
    fn empty_csv_is_header_only() {
        let rows: [LookupRow; 0] = [];
        assert_eq!(render(Format::Csv, &rows), "x,bucket,approx,exact\n");
    }
}
