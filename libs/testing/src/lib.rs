//! Test support for distami.
//!
//! [`ScriptedEc2`] answers each call from a per-operation script. Responses are
//! consumed in order; the last one repeats once the script runs out, so a
//! single error script models a provider that always fails and a single
//! `pending` image models one that never finishes. Image listings are
//! narrowed by tag filters the way EC2 applies `tag:<key>` filters.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use distami_lookup::{Ec2Api, Image, ProviderError, Snapshot, TagFilters};
use tracing::debug;

type Script<T> = Mutex<VecDeque<Result<T, ProviderError>>>;

/// Scripted in-memory EC2 provider.
pub struct ScriptedEc2 {
    region: String,
    images: Script<Vec<Image>>,
    snapshots: Script<Vec<Snapshot>>,
    regions: Script<Vec<String>>,
    image_calls: AtomicU32,
    snapshot_calls: AtomicU32,
    region_calls: AtomicU32,
    seen_filters: Mutex<Vec<Option<TagFilters>>>,
}

impl ScriptedEc2 {
    /// Create a provider bound to `region` with empty scripts.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            images: Mutex::new(VecDeque::new()),
            snapshots: Mutex::new(VecDeque::new()),
            regions: Mutex::new(VecDeque::new()),
            image_calls: AtomicU32::new(0),
            snapshot_calls: AtomicU32::new(0),
            region_calls: AtomicU32::new(0),
            seen_filters: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful image listing.
    pub fn push_images(self, images: Vec<Image>) -> Self {
        lock(&self.images).push_back(Ok(images));
        self
    }

    /// Queue a failed image listing.
    pub fn push_image_error(self, message: &str) -> Self {
        lock(&self.images).push_back(Err(ProviderError::new("DescribeImages", message)));
        self
    }

    /// Queue one single-image listing per state, in order.
    pub fn with_image_states(self, image_id: &str, states: &[&str]) -> Self {
        self.with_tagged_image_states(image_id, &[], states)
    }

    /// Like [`Self::with_image_states`], with every image carrying `tags`.
    pub fn with_tagged_image_states(
        self,
        image_id: &str,
        tags: &[(&str, &str)],
        states: &[&str],
    ) -> Self {
        {
            let mut script = lock(&self.images);
            for state in states {
                let image = tags.iter().fold(
                    Image::new(image_id, *state, self.region.clone()),
                    |image, (k, v)| image.with_tag(*k, *v),
                );
                script.push_back(Ok(vec![image]));
            }
        }
        self
    }

    /// Queue a successful snapshot listing.
    pub fn push_snapshots(self, snapshots: Vec<Snapshot>) -> Self {
        lock(&self.snapshots).push_back(Ok(snapshots));
        self
    }

    /// Queue a failed snapshot listing.
    pub fn push_snapshot_error(self, message: &str) -> Self {
        lock(&self.snapshots).push_back(Err(ProviderError::new("DescribeSnapshots", message)));
        self
    }

    /// Queue a region listing.
    pub fn push_regions<S: Into<String>>(self, regions: impl IntoIterator<Item = S>) -> Self {
        let regions = regions.into_iter().map(Into::into).collect();
        lock(&self.regions).push_back(Ok(regions));
        self
    }

    /// Queue a failed region listing.
    pub fn push_region_error(self, message: &str) -> Self {
        lock(&self.regions).push_back(Err(ProviderError::new("DescribeRegions", message)));
        self
    }

    /// Number of `describe_images` calls made.
    pub fn image_calls(&self) -> u32 {
        self.image_calls.load(Ordering::SeqCst)
    }

    /// Number of `describe_snapshots` calls made.
    pub fn snapshot_calls(&self) -> u32 {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    /// Number of `describe_regions` calls made.
    pub fn region_calls(&self) -> u32 {
        self.region_calls.load(Ordering::SeqCst)
    }

    /// Filters passed to each `describe_images` call, in call order.
    pub fn seen_filters(&self) -> Vec<Option<TagFilters>> {
        lock(&self.seen_filters).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Next scripted response; the last one sticks.
fn next<T: Clone>(script: &Script<T>, operation: &str) -> Result<T, ProviderError> {
    let mut script = lock(script);
    let response = if script.len() > 1 {
        script.pop_front()
    } else {
        script.front().cloned()
    };
    response.unwrap_or_else(|| Err(ProviderError::new(operation, "no scripted response")))
}

#[async_trait]
impl Ec2Api for ScriptedEc2 {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_images(
        &self,
        image_id: &str,
        filters: Option<&TagFilters>,
    ) -> Result<Vec<Image>, ProviderError> {
        let call = self.image_calls.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.seen_filters).push(filters.cloned());
        debug!(image_id, call, "[SCRIPTED] DescribeImages");
        let images = next(&self.images, "DescribeImages")?;
        Ok(match filters {
            Some(filters) => images
                .into_iter()
                .filter(|image| filters.matches(&image.tags))
                .collect(),
            None => images,
        })
    }

    async fn describe_snapshots(&self, snapshot_id: &str) -> Result<Vec<Snapshot>, ProviderError> {
        let call = self.snapshot_calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(snapshot_id, call, "[SCRIPTED] DescribeSnapshots");
        next(&self.snapshots, "DescribeSnapshots")
    }

    async fn describe_regions(&self) -> Result<Vec<String>, ProviderError> {
        let call = self.region_calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(call, "[SCRIPTED] DescribeRegions");
        next(&self.regions, "DescribeRegions")
    }
}
