//! Rental yield and cash flow for an investment property

use crate::financing::monthly_payment;
use crate::format::non_negative;
use crate::rates::PropertyTaxSchedules;
use serde::{Deserialize, Serialize};

/// Which property tax schedule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupancy {
    OwnerOccupied,
    Rented,
}

/// Loan taken to buy the property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    pub loan_amount: f64,
    /// Annual rate in percent
    pub interest_rate: f64,
    pub tenure_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalInputs {
    pub purchase_price: f64,
    pub monthly_rent: f64,
    /// `None` for a cash purchase
    pub financing: Option<MortgageTerms>,
    pub monthly_maintenance: f64,
    pub monthly_sinking_fund: f64,
    pub annual_insurance: f64,
    /// Annual Value assessed by IRAS
    pub annual_value: f64,
    pub occupancy: Occupancy,
}

/// Recurring monthly items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub rent: f64,
    pub mortgage: f64,
    pub property_tax: f64,
    pub maintenance: f64,
    pub sinking_fund: f64,
    pub insurance: f64,
}

impl MonthlyBreakdown {
    pub fn total_expenses(&self) -> f64 {
        self.mortgage + self.property_tax + self.maintenance + self.sinking_fund + self.insurance
    }
}

/// Annualised items, including periodic costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualBreakdown {
    pub recurring_cash_flow: f64,
    /// One month of rent lost per year
    pub vacancy_cost: f64,
    /// One month's rent to an agent every two years
    pub agent_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalAnalysis {
    /// Percent
    pub gross_yield: f64,
    /// Percent, on adjusted annual net cash flow
    pub net_yield: f64,
    /// Percent on cash invested; only for leveraged purchases with positive equity
    pub cash_on_cash_return: Option<f64>,
    /// Annual property tax
    pub property_tax: f64,
    pub recurring_monthly_cash_flow: f64,
    pub adjusted_annual_net_cash_flow: f64,
    pub total_cash_downpayment: f64,
    pub monthly: MonthlyBreakdown,
    pub annual: AnnualBreakdown,
}

/// Property tax on `annual_value` for the given occupancy
pub fn property_tax(annual_value: f64, occupancy: Occupancy, schedules: &PropertyTaxSchedules) -> f64 {
    let schedule = match occupancy {
        Occupancy::OwnerOccupied => &schedules.owner_occupied,
        Occupancy::Rented => &schedules.rented,
    };
    schedule.tax_on(annual_value)
}

/// Yields and cash flow; `None` when price or rent is zero
pub fn rental_analysis(inputs: &RentalInputs, schedules: &PropertyTaxSchedules) -> Option<RentalAnalysis> {
    let purchase_price = non_negative(inputs.purchase_price);
    let monthly_rent = non_negative(inputs.monthly_rent);
    if purchase_price == 0.0 || monthly_rent == 0.0 {
        return None;
    }

    let loan_amount = inputs
        .financing
        .as_ref()
        .map(|terms| non_negative(terms.loan_amount))
        .unwrap_or(0.0);
    let mortgage = inputs
        .financing
        .as_ref()
        .map(|terms| monthly_payment(loan_amount, terms.interest_rate / 100.0, terms.tenure_years))
        .unwrap_or(0.0);

    let annual_property_tax = property_tax(inputs.annual_value, inputs.occupancy, schedules);
    let monthly = MonthlyBreakdown {
        rent: monthly_rent,
        mortgage,
        property_tax: annual_property_tax / 12.0,
        maintenance: non_negative(inputs.monthly_maintenance),
        sinking_fund: non_negative(inputs.monthly_sinking_fund),
        insurance: non_negative(inputs.annual_insurance) / 12.0,
    };

    let recurring_monthly_cash_flow = monthly_rent - monthly.total_expenses();
    let annual = AnnualBreakdown {
        recurring_cash_flow: recurring_monthly_cash_flow * 12.0,
        vacancy_cost: monthly_rent,
        agent_fee: monthly_rent / 2.0,
    };
    let adjusted_annual_net_cash_flow = annual.recurring_cash_flow - annual.vacancy_cost - annual.agent_fee;

    let gross_yield = (monthly_rent * 12.0 / purchase_price) * 100.0;
    let net_yield = (adjusted_annual_net_cash_flow / purchase_price) * 100.0;

    let total_cash_downpayment = purchase_price - loan_amount;
    let cash_on_cash_return = match inputs.financing {
        Some(_) if total_cash_downpayment > 0.0 => {
            Some((adjusted_annual_net_cash_flow / total_cash_downpayment) * 100.0)
        }
        _ => None,
    };

    log::debug!(
        "rental: gross {:.2}%, net {:.2}%, adjusted annual cash flow {:.0}",
        gross_yield,
        net_yield,
        adjusted_annual_net_cash_flow
    );

    Some(RentalAnalysis {
        gross_yield,
        net_yield,
        cash_on_cash_return,
        property_tax: annual_property_tax,
        recurring_monthly_cash_flow,
        adjusted_annual_net_cash_flow,
        total_cash_downpayment,
        monthly,
        annual,
    })
}
