use pipeline::RecordSource;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,

    // Where the returned records came from
    extracted: AtomicUsize,
    quality_fallback: AtomicUsize,
    extraction_fallback: AtomicUsize,
    backend_sample: AtomicUsize,

    // Timing (in microseconds)
    total_pipeline_time_us: AtomicU64,
    pipeline_runs: AtomicUsize,

    total_companies_returned: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            extracted: AtomicUsize::new(0),
            quality_fallback: AtomicUsize::new(0),
            extraction_fallback: AtomicUsize::new(0),
            backend_sample: AtomicUsize::new(0),
            total_pipeline_time_us: AtomicU64::new(0),
            pipeline_runs: AtomicUsize::new(0),
            total_companies_returned: AtomicUsize::new(0),
        })
    }

    pub fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_pipeline(&self, duration: Duration, source: RecordSource, companies: usize) {
        self.total_pipeline_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.pipeline_runs.fetch_add(1, Ordering::Relaxed);
        self.total_companies_returned
            .fetch_add(companies, Ordering::Relaxed);

        let counter = match source {
            RecordSource::Extracted => &self.extracted,
            RecordSource::QualityFallback => &self.quality_fallback,
            RecordSource::ExtractionFallback => &self.extraction_fallback,
            RecordSource::BackendSample => &self.backend_sample,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            sources: SourceCounts {
                extracted: self.extracted.load(Ordering::Relaxed),
                quality_fallback: self.quality_fallback.load(Ordering::Relaxed),
                extraction_fallback: self.extraction_fallback.load(Ordering::Relaxed),
                backend_sample: self.backend_sample.load(Ordering::Relaxed),
            },
            avg_pipeline_time_ms: self
                .avg_time_ms(&self.total_pipeline_time_us, &self.pipeline_runs),
            total_companies_returned: self.total_companies_returned.load(Ordering::Relaxed),
        }
    }

    fn avg_time_ms(&self, total_us: &AtomicU64, count: &AtomicUsize) -> f64 {
        let total = total_us.load(Ordering::Relaxed) as f64;
        let cnt = count.load(Ordering::Relaxed) as f64;
        if cnt > 0.0 {
            total / cnt / 1000.0 // Convert to ms
        } else {
            0.0
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub sources: SourceCounts,
    pub avg_pipeline_time_ms: f64,
    pub total_companies_returned: usize,
}

#[derive(Debug, Serialize)]
pub struct SourceCounts {
    pub extracted: usize,
    pub quality_fallback: usize,
    pub extraction_fallback: usize,
    pub backend_sample: usize,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
