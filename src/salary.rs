//! The salary-record schema and its filterable dimensions.
//!
//! Column names follow the published dataset headers:
//!
//! | column            | type    | meaning                              |
//! |-------------------|---------|--------------------------------------|
//! | `ano`             | Int64   | year                                 |
//! | `senioridade`     | Utf8    | seniority                            |
//! | `contrato`        | Utf8    | contract type                        |
//! | `tamanho_empresa` | Utf8    | company size                         |
//! | `cargo`           | Utf8    | job title                            |
//! | `remoto`          | Utf8    | remote-work mode                     |
//! | `residencia_iso3` | Utf8    | employee residence, ISO-3 code       |
//! | `usd`             | Float64 | annual compensation, normalized USD  |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LoadResult;
use crate::ingestion::{DataSource, LoadOptions, load_dataset};
use crate::types::{DataSet, DataType, Field, Schema};

/// Published location of the salary dataset.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

pub const YEAR: &str = "ano";
pub const SENIORITY: &str = "senioridade";
pub const CONTRACT_TYPE: &str = "contrato";
pub const COMPANY_SIZE: &str = "tamanho_empresa";
pub const JOB_TITLE: &str = "cargo";
pub const REMOTE_MODE: &str = "remoto";
pub const COUNTRY_ISO3: &str = "residencia_iso3";
pub const COMPENSATION_USD: &str = "usd";

/// Schema of a salary record. Extra columns in the source are ignored.
pub fn salary_schema() -> Schema {
    Schema::new(vec![
        Field::new(YEAR, DataType::Int64),
        Field::new(SENIORITY, DataType::Utf8),
        Field::new(CONTRACT_TYPE, DataType::Utf8),
        Field::new(COMPANY_SIZE, DataType::Utf8),
        Field::new(JOB_TITLE, DataType::Utf8),
        Field::new(REMOTE_MODE, DataType::Utf8),
        Field::new(COUNTRY_ISO3, DataType::Utf8),
        Field::new(COMPENSATION_USD, DataType::Float64),
    ])
}

/// Load salary records from `source` using [`salary_schema`].
pub fn load_salaries(source: &DataSource, options: &LoadOptions) -> LoadResult<DataSet> {
    load_dataset(source, &salary_schema(), options)
}

/// A user-facing filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl Dimension {
    /// All dimensions, in sidebar order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Year,
        Dimension::Seniority,
        Dimension::ContractType,
        Dimension::CompanySize,
    ];

    /// Column backing this dimension.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Year => YEAR,
            Dimension::Seniority => SENIORITY,
            Dimension::ContractType => CONTRACT_TYPE,
            Dimension::CompanySize => COMPANY_SIZE,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
