//! Operational dashboard
//!
//! [`DashboardView`] is the overview computed from one merged, scoped
//! dataset. [`Dashboard`] holds the historical side and combines it with a
//! live cache snapshot on demand; it reports `Loading` until both sides have
//! resolved.

use crate::core::aggregate::{
    calculate_alos, calculate_cmi, department_trends, payer_distribution, revenue_by_month,
    severity_distribution, top_doctors, total_revenue, workload_by_department, DepartmentWorkload,
    DoctorCaseload, MonthlyRevenue, PayerShare, SeverityCount, TrendMatrix,
};
use crate::core::merge::merge;
use crate::core::scope::AccessScope;
use crate::core::stream::CacheSnapshot;
use crate::domain::{HistoricalRecord, Loadable, MergedRecord, RecordOrigin};
use serde::Serialize;
use std::sync::Arc;

/// Doctors listed on the overview
pub const TOP_DOCTORS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub total_cases: usize,
    /// Cases that came from the live feed
    pub live_cases: usize,
    pub alos: f64,
    pub cmi: f64,
    pub total_revenue: f64,
    pub workload: Vec<DepartmentWorkload>,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub payer_mix: Vec<PayerShare>,
    pub severity: Vec<SeverityCount>,
    pub top_doctors: Vec<DoctorCaseload>,
    pub trends: TrendMatrix,
}

impl DashboardView {
    pub fn compute(records: &[MergedRecord]) -> Self {
        Self {
            total_cases: records.len(),
            live_cases: records
                .iter()
                .filter(|r| r.origin == RecordOrigin::Live)
                .count(),
            alos: calculate_alos(records),
            cmi: calculate_cmi(records),
            total_revenue: total_revenue(records),
            workload: workload_by_department(records),
            revenue_by_month: revenue_by_month(records),
            payer_mix: payer_distribution(records),
            severity: severity_distribution(records),
            top_doctors: top_doctors(records, TOP_DOCTORS),
            trends: department_trends(records),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    historical: Loadable<Arc<Vec<HistoricalRecord>>>,
    scope: AccessScope,
}

impl Dashboard {
    pub fn new(scope: AccessScope) -> Self {
        Self {
            historical: Loadable::Loading,
            scope,
        }
    }

    /// Resolves the historical side
    pub fn set_historical(&mut self, records: Vec<HistoricalRecord>) {
        self.historical = Loadable::Ready(Arc::new(records));
    }

    pub fn scope(&self) -> &AccessScope {
        &self.scope
    }

    /// Historical then live records the scope permits
    pub fn merged(&self, live: &CacheSnapshot) -> Loadable<Vec<MergedRecord>> {
        self.historical
            .clone()
            .zip(live.state.clone())
            .map(|(historical, live)| self.scope.apply(&merge(&historical, &live)))
    }

    pub fn view(&self, live: &CacheSnapshot) -> Loadable<DashboardView> {
        self.merged(live)
            .map(|records| DashboardView::compute(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decode::decode;
    use crate::core::stream::Freshness;
    use crate::domain::{AdmissionId, CaseType, Department, LiveAdmission, Severity};
    use chrono::{TimeZone, Utc};

    fn historical() -> Vec<HistoricalRecord> {
        decode(
            "header\n\
             2024-01-01,C1,1980,UAE,F,L1,Dr. A,Consultant,Active,1.4,Cardiology,P,Plan,Cash,IP,5,3,Med,09:00,No,2500\n\
             2024-01-01,C2,1975,UAE,M,L2,Dr. B,Consultant,Active,1.0,Emergency,P,Plan,Insurance,OP,0,1,None,10:00,Yes,300",
        )
    }

    fn live_snapshot() -> CacheSnapshot {
        let admission = LiveAdmission {
            id: AdmissionId::new("live-1").unwrap(),
            patient_name: "Jane Doe".to_string(),
            department: Department::Cardiology,
            severity: Severity::new(2).unwrap(),
            doctor_name: "Dr. X".to_string(),
            case_type: CaseType::Inpatient,
            created_at: Utc.with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap(),
        };
        CacheSnapshot {
            state: Loadable::Ready(Arc::new(vec![admission])),
            freshness: Freshness::Current,
            version: 1,
        }
    }

    #[test]
    fn test_loading_until_both_sides_resolve() {
        let mut dashboard = Dashboard::new(AccessScope::unrestricted());
        assert!(!dashboard.view(&live_snapshot()).is_ready());

        dashboard.set_historical(historical());
        assert!(!dashboard.view(&CacheSnapshot::default()).is_ready());
        assert!(dashboard.view(&live_snapshot()).is_ready());
    }

    #[test]
    fn test_empty_sources_resolve_to_empty_view() {
        let mut dashboard = Dashboard::new(AccessScope::unrestricted());
        dashboard.set_historical(Vec::new());
        let empty_live = CacheSnapshot {
            state: Loadable::Ready(Arc::new(Vec::new())),
            ..Default::default()
        };

        let view = dashboard.view(&empty_live).into_ready().unwrap();
        assert_eq!(view.total_cases, 0);
        assert_eq!(view.alos, 0.0);
        assert_eq!(view.cmi, 0.0);
        assert!(view.workload.is_empty());
    }

    #[test]
    fn test_scoped_view() {
        let mut dashboard = Dashboard::new(AccessScope::department("Cardiology"));
        dashboard.set_historical(historical());

        let view = dashboard.view(&live_snapshot()).into_ready().unwrap();
        assert_eq!(view.total_cases, 2);
        assert_eq!(view.live_cases, 1);
        assert_eq!(view.workload.len(), 1);
        assert_eq!(view.workload[0].patients, 2);
        assert_eq!(view.workload[0].doctors, 2);
        assert_eq!(view.alos, 4.0);
        assert_eq!(view.total_revenue, 2500.0);
    }

    #[test]
    fn test_restricted_without_department_sees_nothing() {
        let mut dashboard = Dashboard::new(AccessScope::default());
        dashboard.set_historical(historical());
        let view = dashboard.view(&live_snapshot()).into_ready().unwrap();
        assert_eq!(view.total_cases, 0);
    }

    #[test]
    fn test_unrestricted_overview() {
        let mut dashboard = Dashboard::new(AccessScope::unrestricted());
        dashboard.set_historical(historical());

        let view = dashboard.view(&live_snapshot()).into_ready().unwrap();
        assert_eq!(view.total_cases, 3);
        assert_eq!(view.workload[0].full_name, "Cardiology");
        assert_eq!(view.revenue_by_month.len(), 1);
        assert_eq!(view.revenue_by_month[0].month, "01/24");
        assert_eq!(view.top_doctors.len(), 3);
        assert_eq!(view.trends.len(), 2);
    }
}
