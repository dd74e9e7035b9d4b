//! Batch writer: maps every record of a batch for the configured data type
//! and submits the result to the UDL.

use std::str::FromStr;

use strum_macros::Display;
use thiserror::Error;

use crate::ais::{self, AisError};
use crate::config::{supported_string_values, Config, DataType, DATA_TYPE_VALUES};
use crate::elset;
use crate::ephemeris::{self, EphemerisError};
use crate::record::Record;
use crate::udl::{EphemerisParams, HttpClient, TransportError, UdlClient};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(
        "invalid data type: {value}; expecting the data type to be one of the following values: {expected}"
    )]
    UnsupportedDataType { value: String, expected: String },

    #[error("record {index} has no payload")]
    MissingPayload { index: usize },

    #[error("record {index}: {source}")]
    Ais {
        index: usize,
        #[source]
        source: AisError,
    },

    #[error("record {index}: invalid elset JSON: {source}")]
    Elset {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {index}: {source}")]
    Ephemeris {
        index: usize,
        #[source]
        source: EphemerisError,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Coarse classification of a [`WriteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    ConfigValidation,
    Parse,
    UnmappedIdentity,
    InconsistentReport,
    Transport,
}

impl WriteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WriteError::UnsupportedDataType { .. } => ErrorKind::ConfigValidation,
            WriteError::MissingPayload { .. }
            | WriteError::Ais { .. }
            | WriteError::Elset { .. } => ErrorKind::Parse,
            WriteError::Ephemeris { source, .. } => match source {
                EphemerisError::UnmappedFlightModule(_) => ErrorKind::UnmappedIdentity,
                EphemerisError::MultipleFlightModules { .. } => ErrorKind::InconsistentReport,
                EphemerisError::Parse(_)
                | EphemerisError::EmptyReport
                | EphemerisError::InvalidVelocity { .. } => ErrorKind::Parse,
            },
            WriteError::Transport(TransportError::InvalidUrl { .. }) => {
                ErrorKind::ConfigValidation
            }
            WriteError::Transport(_) => ErrorKind::Transport,
        }
    }
}

pub struct Destination<C: UdlClient> {
    config: Config,
    client: C,
}

impl Destination<HttpClient> {
    /// Connect to the UDL named by `config`.
    pub fn open(config: Config) -> Result<Self, WriteError> {
        let client = HttpClient::from_config(&config)?;
        log::info!(
            "UDL destination ready: {} ({} data, {} mode)",
            config.base_url,
            config.data_type,
            config.data_mode
        );
        Ok(Self::new(config, client))
    }
}

impl<C: UdlClient> Destination<C> {
    pub fn new(config: Config, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Map and submit a batch. Nothing is submitted unless every record maps;
    /// returns the number of records written.
    pub async fn write(&self, records: &[Record]) -> Result<usize, WriteError> {
        let data_type = self.data_type()?;
        if records.is_empty() {
            log::debug!("empty {} batch, nothing to submit", data_type);
            return Ok(0);
        }
        log::info!("writing {} {} records", records.len(), data_type);

        match data_type {
            DataType::Ais => self.write_ais(records).await,
            DataType::Elset => self.write_elsets(records).await,
            DataType::Ephemeris => self.write_ephemeris(records).await,
        }
    }

    fn data_type(&self) -> Result<DataType, WriteError> {
        let value = &self.config.data_type;
        let unsupported = || WriteError::UnsupportedDataType {
            value: value.clone(),
            expected: DATA_TYPE_VALUES
                .iter()
                .map(|v| format!("'{}'", v))
                .collect::<Vec<_>>()
                .join(", "),
        };
        if !supported_string_values(value, DATA_TYPE_VALUES) {
            return Err(unsupported());
        }
        DataType::from_str(value.trim()).map_err(|_| unsupported())
    }

    async fn write_ais(&self, records: &[Record]) -> Result<usize, WriteError> {
        let mut batch = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let raw = payload(record, index)?;
            let ais = ais::to_udl_ais(
                &raw,
                self.config.data_mode,
                &self.config.classification_marking,
            )
            .map_err(|source| {
                log::error!("AIS mapping failed for record {}: {}", index, source);
                WriteError::Ais { index, source }
            })?;
            batch.push(ais);
        }

        self.client.post_ais(&batch).await?;
        log::info!("submitted {} AIS records", batch.len());
        Ok(batch.len())
    }

    async fn write_elsets(&self, records: &[Record]) -> Result<usize, WriteError> {
        let mut batch = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let raw = payload(record, index)?;
            let elset = elset::to_udl_elset(&raw).map_err(|source| {
                log::error!("elset mapping failed for record {}: {}", index, source);
                WriteError::Elset { index, source }
            })?;
            log::debug!("elset: {:?}", elset);
            batch.push(elset);
        }

        self.client.post_elsets(&batch).await?;
        log::info!("submitted {} elsets", batch.len());
        Ok(batch.len())
    }

    /// One filedrop per report; all reports are converted before the first is sent.
    async fn write_ephemeris(&self, records: &[Record]) -> Result<usize, WriteError> {
        let mut reports = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let raw = payload(record, index)?;
            let report = ephemeris::to_udl_ephemeris(&raw).map_err(|source| {
                log::error!("ephemeris conversion failed for record {}: {}", index, source);
                WriteError::Ephemeris { index, source }
            })?;
            reports.push(report);
        }

        for report in &reports {
            let params = EphemerisParams::routine(
                &report.id,
                &self.config.classification_marking,
                self.config.data_mode,
            );
            self.client
                .post_ephemeris(&params, report.to_string())
                .await?;
            log::info!(
                "submitted ephemeris for {} ({} entries): {:?}",
                report.id,
                report.entries.len(),
                params
            );
        }
        Ok(reports.len())
    }
}

fn payload(record: &Record, index: usize) -> Result<Vec<u8>, WriteError> {
    record
        .payload
        .after
        .as_ref()
        .map(|data| data.payload_bytes().into_owned())
        .ok_or(WriteError::MissingPayload { index })
}
