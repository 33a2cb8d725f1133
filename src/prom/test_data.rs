//! Shared fixtures: a trimmed but faithful cAdvisor scrape.
//!
//! The excerpt keeps the shapes that matter for tests: HELP/TYPE metadata,
//! labeled and unlabeled samples, optional timestamps, summary quantiles and
//! families from every default category plus a few that fall through to
//! "other". 17 families, 34 samples; 27 samples carry an `id` label spread
//! over 3 containers.

/// Container id used by most fixture samples.
pub const CONTAINER_ONE: &str = "/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4";
/// Second kubepods container.
pub const CONTAINER_TWO: &str = "/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf";
/// A system slice that the default export filters drop.
pub const SYSTEM_SLICE: &str = "/system.slice/docker.service";

pub const CADVISOR_SCRAPE: &str = r#"# Scraped from cadvisor
# HELP cadvisor_version_info A metric with a constant '1' value labeled by kernel version, OS version, docker version, cadvisor version & cadvisor revision.
# TYPE cadvisor_version_info gauge
cadvisor_version_info{cadvisorRevision="de723a09",cadvisorVersion="v0.47.2",dockerVersion="",kernelVersion="6.1.0-13-amd64",osVersion="Alpine Linux v3.16"} 1

# HELP container_cpu_usage_seconds_total Cumulative cpu time consumed in seconds.
# TYPE container_cpu_usage_seconds_total counter
container_cpu_usage_seconds_total{cpu="total",id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4",image="registry.local/api:1.4"} 4404.926161 1756104000000
container_cpu_usage_seconds_total{cpu="total",id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf",image="registry.local/worker:2.0"} 126.713456 1756104000000
container_cpu_usage_seconds_total{cpu="total",id="/system.slice/docker.service",image=""} 892.4452 1756104000000
# HELP container_cpu_load_average_10s Value of container cpu load average over the last 10 seconds.
# TYPE container_cpu_load_average_10s gauge
container_cpu_load_average_10s{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4"} 0.12 1756104000000
container_cpu_load_average_10s{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf"} 0.04 1756104000000
# HELP container_cpu_cfs_periods_total Number of elapsed enforcement period intervals.
# TYPE container_cpu_cfs_periods_total counter
container_cpu_cfs_periods_total{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4"} 152363 1756104000000
container_cpu_cfs_periods_total{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf"} 48120 1756104000000
# HELP container_cpu_cfs_throttled_periods_total Number of throttled period intervals.
# TYPE container_cpu_cfs_throttled_periods_total counter
container_cpu_cfs_throttled_periods_total{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4"} 1523 1756104000000
container_cpu_cfs_throttled_periods_total{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf"} 89 1756104000000

# HELP container_memory_usage_bytes Current memory usage in bytes, including all memory regardless of when it was accessed
# TYPE container_memory_usage_bytes gauge
container_memory_usage_bytes{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4"} 536870912 1756104000000
container_memory_usage_bytes{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf"} 134217728 1756104000000
container_memory_usage_bytes{id="/system.slice/docker.service"} 67108864 1756104000000
# HELP container_memory_limit_bytes Memory limit for the container.
# TYPE container_memory_limit_bytes gauge
container_memory_limit_bytes{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4"} 1073741824 1756104000000
container_memory_limit_bytes{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf"} 1073741824 1756104000000
container_memory_limit_bytes{id="/system.slice/docker.service"} 2147483648 1756104000000
# HELP container_memory_working_set_bytes Current working set in bytes.
# TYPE container_memory_working_set_bytes gauge
container_memory_working_set_bytes{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4"} 419430400 1756104000000
container_memory_working_set_bytes{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf"} 104857600 1756104000000

# HELP container_network_receive_bytes_total Cumulative count of bytes received
# TYPE container_network_receive_bytes_total counter
container_network_receive_bytes_total{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4",interface="eth0"} 1.0537e+07 1756104000000
container_network_receive_bytes_total{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf",interface="eth0"} 2.34e+06 1756104000000
# HELP container_network_transmit_bytes_total Cumulative count of bytes transmitted
# TYPE container_network_transmit_bytes_total counter
container_network_transmit_bytes_total{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4",interface="eth0"} 8.4e+06 1756104000000
container_network_transmit_bytes_total{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf",interface="eth0"} 1.2e+06 1756104000000
# HELP container_network_receive_packets_total Cumulative count of packets received
# TYPE container_network_receive_packets_total counter
container_network_receive_packets_total{id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4",interface="eth0"} 48213 1756104000000
container_network_receive_packets_total{id="/kubepods/burstable/pod5eadf5bb/3b8e21b0faaf",interface="eth0"} 9321 1756104000000

# HELP container_fs_usage_bytes Number of bytes that are consumed by the container on this filesystem.
# TYPE container_fs_usage_bytes gauge
container_fs_usage_bytes{device="/dev/sda1",id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4"} 4.2342e+09 1756104000000
container_fs_usage_bytes{device="/dev/sda1",id="/system.slice/docker.service"} 9.1e+08 1756104000000
# HELP container_fs_limit_bytes Number of bytes that can be consumed by the container on this filesystem.
# TYPE container_fs_limit_bytes gauge
container_fs_limit_bytes{device="/dev/sda1",id="/kubepods/burstable/pod5eadf5bb/8fa2d0c1e1a4"} 1.006632e+11 1756104000000
container_fs_limit_bytes{device="/dev/sda1",id="/system.slice/docker.service"} 1.006632e+11 1756104000000

# HELP machine_cpu_cores Number of logical CPU cores.
# TYPE machine_cpu_cores gauge
machine_cpu_cores 8
# HELP go_gc_duration_seconds A summary of the pause duration of garbage collection cycles.
# TYPE go_gc_duration_seconds summary
go_gc_duration_seconds{quantile="0"} 2.5e-05
go_gc_duration_seconds{quantile="0.5"} 6.1e-05
go_gc_duration_seconds{quantile="1"} 0.000335
go_gc_duration_seconds_sum 0.042
go_gc_duration_seconds_count 612
"#;

/// Family count in [`CADVISOR_SCRAPE`].
pub const FAMILY_COUNT: usize = 17;
/// Sample count in [`CADVISOR_SCRAPE`].
pub const SAMPLE_COUNT: usize = 34;
