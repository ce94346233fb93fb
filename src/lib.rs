use log::{debug, info};
use plotters::prelude::*;
use std::fs::File;
use std::path::Path;
pub mod axis;
pub mod error;
pub mod report;

pub use axis::TickedAxis;
pub use error::{ReportError, ReportResult};

pub const CSV_IN: &str = "results.csv";
pub const PNG_OUT: &str = "backlog_impact.png";

pub const TITLE: &str = "Impacto do Backlog no Número de Conexões Bem-sucedidas";
pub const X_DESC: &str = "Backlog";
pub const Y_DESC: &str = "Número de Conexões Bem-sucedidas";

/// 10x6 inches at 100 dpi
pub const CANVAS_SIZE: (u32, u32) = (1000, 600);

/// One observation: the listen backlog of a run and the connections that succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub backlog: i64,
    pub connections: i64,
}

impl Record {
    pub fn new(backlog: i64, connections: i64) -> Record {
        Record {
            backlog,
            connections,
        }
    }
}

/// The records in file order, header excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Dataset {
        Dataset { records }
    }

    /// Init a Dataset from csv.
    /// The first row is a header and is skipped without looking at it,
    /// only the first two fields of the other rows are used.
    /// Any bad row aborts the whole read, an empty line counts as a row without fields.
    pub fn from_csv(fin: &Path) -> ReportResult<Dataset> {
        let bytes = std::fs::read(fin).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ReportError::NotFound {
                path: fin.to_path_buf(),
            },
            _ => ReportError::Read {
                path: fin.to_path_buf(),
                source: csv::Error::from(e),
            },
        })?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(&bytes[..]);
        let mut records = Vec::new();
        let mut row = csv::StringRecord::new();
        loop {
            let more = rdr
                .read_record(&mut row)
                .map_err(|source| ReportError::Read {
                    path: fin.to_path_buf(),
                    source,
                })?;
            // the position is taken before the reader skips empty lines
            let (line, byte) = row
                .position()
                .map(|p| (p.line(), p.byte() as usize))
                .unwrap_or_default();
            if starts_with_empty_line(&bytes, byte) {
                return Err(ReportError::Format { line, fields: 0 });
            }
            if !more {
                break;
            }
            let record = match (row.get(0), row.get(1)) {
                (Some(b), Some(c)) => Record::new(
                    parse_field(b, line, "backlog")?,
                    parse_field(c, line, "connections")?,
                ),
                _ => {
                    return Err(ReportError::Format {
                        line,
                        fields: row.len(),
                    })
                }
            };
            debug!("line {}: {:?}", line, record);
            records.push(record);
        }
        info!("loaded {} record(s) from {}", records.len(), fin.display());
        Ok(Dataset { records })
    }

    /// Stable sort by backlog, equal backlogs keep their file order.
    pub fn sort(self) -> SortedDataset {
        let mut records = self.records;
        records.sort_by_key(|r| r.backlog);
        SortedDataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::new(records)
    }
}

/// true when the text at `at` begins with an empty line;
/// a `\n` completing the previous record's `\r\n` is not one
fn starts_with_empty_line(bytes: &[u8], at: usize) -> bool {
    let mut rest = bytes.get(at..).unwrap_or_default();
    if at > 0 && bytes[at - 1] == b'\r' && rest.first() == Some(&b'\n') {
        rest = &rest[1..];
    }
    matches!(rest.first(), Some(b'\n') | Some(b'\r'))
}

fn parse_field(field: &str, line: u64, column: &'static str) -> ReportResult<i64> {
    field.parse::<i64>().map_err(|source| ReportError::Parse {
        line,
        column,
        value: field.to_string(),
        source,
    })
}

/// Records ordered by ascending backlog; only `Dataset::sort` builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedDataset {
    records: Vec<Record>,
}

impl SortedDataset {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Integer ticks for both axes: every backlog from min to max,
    /// every connection count from 0 to max.
    pub fn axis_ticks(&self) -> ReportResult<(Vec<i64>, Vec<i64>)> {
        let backlog: Vec<i64> = self.records.iter().map(|r| r.backlog).collect();
        let connections: Vec<i64> = self.records.iter().map(|r| r.connections).collect();
        let (xmin, xmax) = min_and_max(&backlog[..]).ok_or(ReportError::EmptyDataset)?;
        let (_, ymax) = min_and_max(&connections[..]).ok_or(ReportError::EmptyDataset)?;
        Ok((integer_ticks(xmin, xmax), integer_ticks(0, ymax)))
    }

    /// The axes the chart is drawn on: grid lines and labels at `axis_ticks`,
    /// the plotted y range also covers values below 0.
    pub fn chart_axes(&self) -> ReportResult<(TickedAxis, TickedAxis)> {
        let (xticks, yticks) = self.axis_ticks()?;
        let (xmin, xmax) = (self.records[0].backlog, self.records[self.len() - 1].backlog);
        let (ymin, ymax) = self
            .records
            .iter()
            .fold((0, 0), |(lo, hi), r| (r.connections.min(lo), r.connections.max(hi)));
        Ok((
            TickedAxis::new(xmin, xmax, &xticks),
            TickedAxis::new(ymin, ymax, &yticks),
        ))
    }

    /// plots connections against backlog, line and markers, to png
    pub fn plot_png(&self, fout: &Path) -> ReportResult<()> {
        let (xaxis, yaxis) = self.chart_axes()?;
        let (n_xlabels, n_ylabels) = (xaxis.ticks().len(), yaxis.ticks().len());
        debug!("x range {:?}, y range {:?}", xaxis.range(), yaxis.range());

        File::create(fout).map_err(|source| ReportError::Io {
            path: fout.to_path_buf(),
            source,
        })?;
        let root = BitMapBackend::new(fout, CANVAS_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(xaxis, yaxis)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(200, 200, 200).stroke_width(1))
            .label_style(("sans-serif", 14))
            .x_labels(n_xlabels)
            .y_labels(n_ylabels)
            .x_label_formatter(&|x: &f64| format!("{}", x.round() as i64))
            .y_label_formatter(&|y: &f64| format!("{}", y.round() as i64))
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        let points: Vec<(f64, f64)> = self
            .records
            .iter()
            .map(|r| (r.backlog as f64, r.connections as f64))
            .collect();
        let color = RGBColor(31, 119, 180);
        chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 5, color.filled())))?;
        root.present()?;
        info!("wrote chart to {}", fout.display());
        Ok(())
    }
}

impl std::fmt::Display for SortedDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "backlog,connections")?;
        for r in self.records.iter() {
            writeln!(f, "{},{}", r.backlog, r.connections)?
        }
        Ok(())
    }
}

/// min and max of a slice, None when it is empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// every integer from first to last, both included
pub fn integer_ticks(first: i64, last: i64) -> Vec<i64> {
    (first..=last).collect()
}
