//! Salary entries and their fixed withholding categories.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::*, record_id::RecordId};

/// Named withholdings taken out of a paycheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeductionKind {
    /// Social Security System contribution.
    Sss,
    /// Pag-IBIG housing fund contribution.
    Pagibig,
    /// PhilHealth health insurance premium.
    Philhealth,
    /// Variable universal life insurance premium.
    Vul,
    EmergencyFund,
    GeneralSavings,
}

impl DeductionKind {
    pub const ALL: [DeductionKind; 6] = [
        DeductionKind::Sss,
        DeductionKind::Pagibig,
        DeductionKind::Philhealth,
        DeductionKind::Vul,
        DeductionKind::EmergencyFund,
        DeductionKind::GeneralSavings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeductionKind::Sss => "SSS",
            DeductionKind::Pagibig => "Pag-IBIG",
            DeductionKind::Philhealth => "PhilHealth",
            DeductionKind::Vul => "VUL",
            DeductionKind::EmergencyFund => "Emergency Fund",
            DeductionKind::GeneralSavings => "General Savings",
        }
    }
}

impl fmt::Display for DeductionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Withholding amounts for one paycheck. Absent fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    pub sss: f64,
    pub pagibig: f64,
    pub philhealth: f64,
    pub vul: f64,
    pub emergency_fund: f64,
    pub general_savings: f64,
}

impl Deductions {
    pub fn get(&self, kind: DeductionKind) -> f64 {
        match kind {
            DeductionKind::Sss => self.sss,
            DeductionKind::Pagibig => self.pagibig,
            DeductionKind::Philhealth => self.philhealth,
            DeductionKind::Vul => self.vul,
            DeductionKind::EmergencyFund => self.emergency_fund,
            DeductionKind::GeneralSavings => self.general_savings,
        }
    }

    pub fn set(&mut self, kind: DeductionKind, amount: f64) {
        let slot = match kind {
            DeductionKind::Sss => &mut self.sss,
            DeductionKind::Pagibig => &mut self.pagibig,
            DeductionKind::Philhealth => &mut self.philhealth,
            DeductionKind::Vul => &mut self.vul,
            DeductionKind::EmergencyFund => &mut self.emergency_fund,
            DeductionKind::GeneralSavings => &mut self.general_savings,
        };
        *slot = amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeductionKind, f64)> + '_ {
        DeductionKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: RecordId,
    pub date: NaiveDate,
    pub gross_amount: f64,
    #[serde(default)]
    pub deductions: Deductions,
}

impl IncomeEntry {
    pub fn new(date: NaiveDate, gross_amount: f64) -> Self {
        Self {
            id: RecordId::generate(),
            date,
            gross_amount,
            deductions: Deductions::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_deduction(mut self, kind: DeductionKind, amount: f64) -> Self {
        self.deductions.set(kind, amount);
        self
    }
}

impl Identifiable for IncomeEntry {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Dated for IncomeEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Displayable for IncomeEntry {
    fn display_label(&self) -> String {
        format!("paycheck on {}", self.date)
    }
}
