//! CSV export of generated bundles.
//!
//! Column headers are the ones the well-permit forms expect, so they stay in
//! Portuguese.

use crate::bundle::Bundle;
use csv::{StringRecord, Writer, WriterBuilder};
use log::info;
use std::path::{Path, PathBuf};
use wsim_data::consumption::DateRow;
use wsim_data::well_test::{PumpingTestParams, RecoveryTestParams, TestReading};
use wsim_utils::dates::{format_date, format_time};

pub const CONSUMPTION_HEADERS: [&str; 10] = [
    "Data",
    "Hora",
    "Horimetro",
    "Medidor de Vazão",
    "Tempo de Captação (h)",
    "Volume diário (m3)",
    "Volume acumulado Mensal (m3)",
    "Valor",
    "Unidade",
    "Observação",
];

pub const PUMPING_HEADERS: [&str; 4] = ["Tempo (min)", "Data/Hora", "Nível (m)", "Vazão (m³/h)"];

pub const RECOVERY_HEADERS: [&str; 3] = ["Tempo (min)", "Data/Hora", "Nível (m)"];

/// Export `bundle_path` to CSV at `output`.
pub fn run_export(bundle_path: &str, output: &str) -> anyhow::Result<()> {
    let bundle = Bundle::read(bundle_path)?;
    match &bundle {
        Bundle::Consumption { report, .. } => {
            std::fs::write(output, consumption_csv(&report.rows)?)?;
            info!("Exported {} consumption rows to {}", report.rows.len(), output);
        }
        Bundle::WellTest {
            pumping_params,
            recovery_params,
            recovery_levels,
            pumping,
            recovery,
        } => {
            let (pumping_path, recovery_path) = well_test_paths(Path::new(output));
            std::fs::write(&pumping_path, pumping_csv(pumping_params, pumping)?)?;
            std::fs::write(
                &recovery_path,
                recovery_csv(recovery_params, *recovery_levels, recovery)?,
            )?;
            info!(
                "Exported {} pumping readings to {} and {} recovery readings to {}",
                pumping.len(),
                pumping_path.display(),
                recovery.len(),
                recovery_path.display()
            );
        }
    }
    Ok(())
}

pub fn consumption_csv(rows: &[DateRow]) -> anyhow::Result<String> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(CONSUMPTION_HEADERS)?;
    for row in rows {
        let record = StringRecord::from(vec![
            format_date(&row.date),
            format_time(&row.time_of_day),
            format!("{:.3}", row.time_meter),
            format!("{:.3}", row.volume_meter),
            format!("{:.2}", row.time_increment),
            format!("{:.3}", row.volume_increment),
            format!("{:.3}", row.volume_month_to_date),
            format!("{:.2}", row.flow_rate),
            row.unit.clone(),
            row.annotation.clone(),
        ]);
        writer.write_record(&record)?;
    }
    into_string(writer)
}

/// Pumping test parameters followed by the readings table.
pub fn pumping_csv(params: &PumpingTestParams, readings: &[TestReading]) -> anyhow::Result<String> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(vec![]);
    write_parameters(
        &mut writer,
        "Parâmetros do Teste de Bombeamento",
        &[
            ("Data de Início", format_date(&params.start_date)),
            ("Hora de Início", format_time(&params.start_time)),
            ("Nível Inicial (m)", params.initial_level.to_string()),
            ("Nível Final (m)", params.final_level.to_string()),
            ("Vazão Inicial (m³/h)", params.initial_flow.to_string()),
            ("Vazão Final (m³/h)", params.final_flow.to_string()),
            ("Tempo de Estabilização (min)", params.stabilization_minutes.to_string()),
            ("Tempo Total do Teste (h)", params.total_hours.to_string()),
        ],
    )?;
    writer.write_record(PUMPING_HEADERS)?;
    for reading in readings {
        let mut record = reading_record(reading);
        record.push_field(&reading.flow.map_or(String::new(), |v| format!("{:.1}", v)));
        writer.write_record(&record)?;
    }
    into_string(writer)
}

/// Recovery test parameters followed by the readings table. Recovery
/// readings carry no flow, so the table has no flow column.
pub fn recovery_csv(
    params: &RecoveryTestParams,
    levels: (f64, f64),
    readings: &[TestReading],
) -> anyhow::Result<String> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(vec![]);
    write_parameters(
        &mut writer,
        "Parâmetros do Teste de Recuperação",
        &[
            ("Data de Início", format_date(&params.start_date)),
            ("Hora de Início", format_time(&params.start_time)),
            ("Hora de Fim", format_time(&params.end_time)),
            ("Tempo de Estabilização (min)", params.stabilization_minutes.to_string()),
            ("Número de Leituras até o Nível Final", params.reading_count.to_string()),
            ("Nível Inicial (m)", levels.0.to_string()),
            ("Nível Final (m)", levels.1.to_string()),
        ],
    )?;
    writer.write_record(RECOVERY_HEADERS)?;
    for reading in readings {
        writer.write_record(&reading_record(reading))?;
    }
    into_string(writer)
}

fn write_parameters(
    writer: &mut Writer<Vec<u8>>,
    title: &str,
    parameters: &[(&str, String)],
) -> anyhow::Result<()> {
    writer.write_record([title])?;
    for (name, value) in parameters {
        writer.write_record([*name, value.as_str()])?;
    }
    Ok(())
}

/// Elapsed time, timestamp and level, shared by both tests.
fn reading_record(reading: &TestReading) -> StringRecord {
    StringRecord::from(vec![
        format_elapsed(reading.elapsed_minutes),
        format!(
            "{} {}",
            format_date(&reading.timestamp.date()),
            format_time(&reading.timestamp.time())
        ),
        format!("{:.1}", reading.level),
    ])
}

fn into_string(writer: Writer<Vec<u8>>) -> anyhow::Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Whole minutes print without decimals; recovery steps may be fractional.
fn format_elapsed(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{}", minutes as i64)
    } else {
        format!("{:.2}", minutes)
    }
}

/// `out/test.csv` becomes `out/test-pumping.csv` and `out/test-recovery.csv`.
fn well_test_paths(output: &Path) -> (PathBuf, PathBuf) {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "well-test".to_string());
    (
        output.with_file_name(format!("{stem}-pumping.csv")),
        output.with_file_name(format!("{stem}-recovery.csv")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeDelta};

    fn row() -> DateRow {
        DateRow {
            date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            time_of_day: NaiveTime::from_hms_opt(8, 23, 0).unwrap(),
            time_meter: 1003.5,
            volume_meter: 5017.25,
            time_increment: 3.5,
            volume_increment: 17.25,
            volume_month_to_date: 17.25,
            flow_rate: 4.93,
            unit: "m³/h".to_string(),
            annotation: String::new(),
        }
    }

    #[test]
    fn test_consumption_csv() {
        let csv = consumption_csv(&[row()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Data,Hora,Horimetro,Medidor de Vazão,Tempo de Captação (h),Volume diário (m3),Volume acumulado Mensal (m3),Valor,Unidade,Observação"
        );
        assert_eq!(
            lines.next().unwrap(),
            "15/07/2024,08:23:00,1003.500,5017.250,3.50,17.250,17.250,4.93,m³/h,"
        );
        assert!(lines.next().is_none());
    }

    fn start() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap()
    }

    fn pumping_params() -> PumpingTestParams {
        PumpingTestParams {
            start_date: start().date(),
            start_time: start().time(),
            initial_level: 12.0,
            final_level: 35.5,
            initial_flow: 20.0,
            final_flow: 14.0,
            stabilization_minutes: 90,
            total_hours: 4,
        }
    }

    fn recovery_params() -> RecoveryTestParams {
        RecoveryTestParams {
            start_date: start().date(),
            start_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            stabilization_minutes: 10,
            reading_count: 3,
        }
    }

    #[test]
    fn test_pumping_csv() {
        let readings = vec![
            TestReading {
                elapsed_minutes: 0.0,
                timestamp: start(),
                level: 12.0,
                flow: Some(0.0),
            },
            TestReading {
                elapsed_minutes: 1.0,
                timestamp: start() + TimeDelta::minutes(1),
                level: 14.3,
                flow: Some(20.0),
            },
        ];
        let csv = pumping_csv(&pumping_params(), &readings).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Parâmetros do Teste de Bombeamento");
        assert_eq!(lines[1], "Data de Início,10/05/2024");
        assert_eq!(lines[2], "Hora de Início,07:00:00");
        assert_eq!(lines[4], "Nível Final (m),35.5");
        assert_eq!(lines[8], "Tempo Total do Teste (h),4");
        assert_eq!(lines[9], "Tempo (min),Data/Hora,Nível (m),Vazão (m³/h)");
        assert_eq!(lines[10], "0,10/05/2024 07:00:00,12.0,0.0");
        assert_eq!(lines[11], "1,10/05/2024 07:01:00,14.3,20.0");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_recovery_csv_has_no_flow_column() {
        let recovery_start = start().date().and_time(recovery_params().start_time);
        let readings = vec![
            TestReading {
                elapsed_minutes: 0.0,
                timestamp: recovery_start,
                level: 35.0,
                flow: None,
            },
            TestReading {
                elapsed_minutes: 10.0 / 3.0,
                timestamp: recovery_start + TimeDelta::milliseconds(200_000),
                level: 30.3,
                flow: None,
            },
        ];
        let csv = recovery_csv(&recovery_params(), (35.0, 12.0), &readings).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Parâmetros do Teste de Recuperação");
        assert_eq!(lines[3], "Hora de Fim,14:30:00");
        assert_eq!(lines[5], "Número de Leituras até o Nível Final,3");
        assert_eq!(lines[6], "Nível Inicial (m),35");
        assert_eq!(lines[7], "Nível Final (m),12");
        assert_eq!(lines[8], "Tempo (min),Data/Hora,Nível (m)");
        assert_eq!(lines[9], "0,10/05/2024 11:00:00,35.0");
        assert_eq!(lines[10], "3.33,10/05/2024 11:03:20,30.3");
        assert!(!csv.contains("Vazão (m³/h)"));
    }

    #[test]
    fn test_run_export_well_test_bundle() {
        let bundle = Bundle::WellTest {
            pumping_params: pumping_params(),
            recovery_params: recovery_params(),
            recovery_levels: (35.5, 12.0),
            pumping: vec![TestReading {
                elapsed_minutes: 0.0,
                timestamp: start(),
                level: 12.0,
                flow: Some(0.0),
            }],
            recovery: vec![],
        };
        let dir = std::env::temp_dir();
        let bundle_path = dir.join(format!("wsim-export-well-{}.json", std::process::id()));
        let csv_path = dir.join(format!("wsim-export-well-{}.csv", std::process::id()));
        bundle.write(&bundle_path).unwrap();

        run_export(bundle_path.to_str().unwrap(), csv_path.to_str().unwrap()).unwrap();
        let (pumping_path, recovery_path) = well_test_paths(&csv_path);
        let pumping = std::fs::read_to_string(&pumping_path).unwrap();
        let recovery = std::fs::read_to_string(&recovery_path).unwrap();
        std::fs::remove_file(&bundle_path).unwrap();
        std::fs::remove_file(&pumping_path).unwrap();
        std::fs::remove_file(&recovery_path).unwrap();

        assert!(pumping.contains("Vazão (m³/h)"));
        assert_eq!(recovery.lines().last(), Some("Tempo (min),Data/Hora,Nível (m)"));
        assert!(recovery.contains("Nível Inicial (m),35.5"));
    }

    #[test]
    fn test_well_test_paths() {
        let (pumping, recovery) = well_test_paths(Path::new("out/poço.csv"));
        assert_eq!(pumping, PathBuf::from("out/poço-pumping.csv"));
        assert_eq!(recovery, PathBuf::from("out/poço-recovery.csv"));
    }

    #[test]
    fn test_run_export_consumption_bundle() {
        use wsim_core::meter::{DailyCaps, MeterPair};
        use wsim_core::selection::{DateSource, PeriodSelection};
        use wsim_data::consumption::{ConsumptionParams, ConsumptionReport};

        let day = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let bundle = Bundle::Consumption {
            params: ConsumptionParams {
                dates: DateSource::Period(PeriodSelection::new(day, day)),
                time_meter: MeterPair::new(1000.0, 1003.5),
                volume_meter: MeterPair::new(5000.0, 5017.25),
                caps: DailyCaps {
                    max_time_per_day: 10.0,
                    max_volume_per_day: 50.0,
                },
            },
            report: ConsumptionReport {
                rows: vec![row()],
                advisories: vec![],
            },
        };
        let dir = std::env::temp_dir();
        let bundle_path = dir.join(format!("wsim-export-{}.json", std::process::id()));
        let csv_path = dir.join(format!("wsim-export-{}.csv", std::process::id()));
        bundle.write(&bundle_path).unwrap();

        run_export(
            bundle_path.to_str().unwrap(),
            csv_path.to_str().unwrap(),
        )
        .unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        std::fs::remove_file(&bundle_path).unwrap();
        std::fs::remove_file(&csv_path).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("15/07/2024"));
    }
}
