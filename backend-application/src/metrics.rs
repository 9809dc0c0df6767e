use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::EntryClassification;

#[derive(Debug, Default)]
pub struct Metrics {
    check_ins: AtomicU64,
    first_entries: AtomicU64,
    re_entries: AtomicU64,
    malformed_tickets: AtomicU64,
    unknown_tickets: AtomicU64,
    registrations: AtomicU64,
    duplicate_registrations: AtomicU64,
    store_errors: AtomicU64,
}

impl Metrics {
    pub fn record_check_in(&self, classification: EntryClassification) {
        self.check_ins.fetch_add(1, Ordering::Relaxed);
        match classification {
            EntryClassification::FirstEntry => {
                self.first_entries.fetch_add(1, Ordering::Relaxed);
            }
            EntryClassification::ReEntry(_) => {
                self.re_entries.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn record_malformed_ticket(&self) {
        self.malformed_tickets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unknown_ticket(&self) {
        self.unknown_tickets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_registration(&self) {
        self.registrations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate_registration(&self) {
        self.duplicate_registrations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let counters = [
            ("pulse_check_ins_total", &self.check_ins),
            ("pulse_first_entries_total", &self.first_entries),
            ("pulse_re_entries_total", &self.re_entries),
            ("pulse_malformed_tickets_total", &self.malformed_tickets),
            ("pulse_unknown_tickets_total", &self.unknown_tickets),
            ("pulse_registrations_total", &self.registrations),
            ("pulse_duplicate_registrations_total", &self.duplicate_registrations),
            ("pulse_store_errors_total", &self.store_errors),
        ];
        let mut out = String::new();
        for (name, counter) in counters {
            out.push_str(&format!(
                "# TYPE {} counter\n{} {}\n",
                name,
                name,
                counter.load(Ordering::Relaxed)
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prometheus_output_reflects_recorded_outcomes() {
        let metrics = Metrics::default();
        metrics.record_check_in(EntryClassification::FirstEntry);
        metrics.record_check_in(EntryClassification::ReEntry(2));
        metrics.record_malformed_ticket();

        let text = metrics.render_prometheus();
        assert!(text.contains("pulse_check_ins_total 2\n"));
        assert!(text.contains("pulse_first_entries_total 1\n"));
        assert!(text.contains("pulse_re_entries_total 1\n"));
        assert!(text.contains("pulse_malformed_tickets_total 1\n"));
        assert!(text.contains("pulse_unknown_tickets_total 0\n"));
    }
}
