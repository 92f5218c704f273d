//! Time-based UUIDs (versions 1 and 2)

use rand::{rngs::OsRng, CryptoRng, RngCore};

use crate::{Error, Uuid, Version};

/// Number of 100-nanosecond intervals between the Gregorian reform (1582-10-15) and the Unix
/// epoch (1970-01-01), derived from the Julian day numbers 2299160 and 2440587.
pub const GREGORIAN_OFFSET: u64 = (2_440_587 - 2_299_160) * 86_400 * 10_000_000;

/// A trait that supplies the 60-bit timestamp of [`TimeGenerator`].
pub trait Clock {
    /// Returns the number of 100-nanosecond intervals elapsed since 1582-10-15 00:00:00 UTC.
    fn gregorian_ticks(&mut self) -> u64;
}

/// The system clock.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn gregorian_ticks(&mut self) -> u64 {
        gregorian_ticks_at(std::time::SystemTime::now())
    }
}

/// Converts a system time into 100-nanosecond intervals since 1582-10-15, saturating at zero
/// for earlier times.
fn gregorian_ticks_at(time: std::time::SystemTime) -> u64 {
    match time.duration_since(std::time::UNIX_EPOCH) {
        Ok(since_unix) => GREGORIAN_OFFSET.saturating_add((since_unix.as_nanos() / 100) as u64),
        Err(e) => {
            let before_unix = (e.duration().as_nanos() / 100).min(u128::from(u64::MAX)) as u64;
            GREGORIAN_OFFSET.saturating_sub(before_unix)
        }
    }
}

/// A trait that supplies the 48-bit node ID of [`TimeGenerator`].
pub trait NodeSource {
    /// Returns a hardware address, or `None` if none is available.
    fn node_id(&mut self) -> Option<[u8; 6]>;
}

/// The hardware address of the first network interface that is up and has a non-zero one.
///
/// Interfaces are enumerated with `getifaddrs(3)`. Without the `mac` crate feature, or on targets
/// other than Linux, Android, macOS, illumos, and the BSDs, no address is ever reported.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct HardwareNode;

impl NodeSource for HardwareNode {
    fn node_id(&mut self) -> Option<[u8; 6]> {
        first_up_hardware_address(ifaddrs::interfaces())
    }
}

/// A network interface entry as seen by the node ID lookup.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
struct Interface {
    name: String,
    is_up: bool,
    hardware_addr: Option<[u8; 6]>,
}

/// Picks the hardware address of the first interface that is up and has a non-zero address.
fn first_up_hardware_address(interfaces: impl IntoIterator<Item = Interface>) -> Option<[u8; 6]> {
    let found = interfaces
        .into_iter()
        .find(|i| i.is_up && i.hardware_addr.is_some_and(|addr| addr != [0; 6]));
    match found {
        Some(i) => {
            log::trace!("node_id: using hardware address of {}", i.name);
            i.hardware_addr
        }
        None => {
            log::debug!("node_id: no network interface is up with a hardware address");
            None
        }
    }
}

#[cfg(all(
    feature = "mac",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "illumos"
    )
))]
mod ifaddrs {
    use super::Interface;
    use nix::net::if_::InterfaceFlags;

    /// Lists every interface address entry, in the order the system reports them.
    pub(super) fn interfaces() -> Vec<Interface> {
        match nix::ifaddrs::getifaddrs() {
            Ok(entries) => entries
                .map(|entry| Interface {
                    hardware_addr: entry
                        .address
                        .as_ref()
                        .and_then(|addr| addr.as_link_addr())
                        .and_then(|link| link.addr()),
                    is_up: entry.flags.contains(InterfaceFlags::IFF_UP),
                    name: entry.interface_name,
                })
                .collect(),
            Err(e) => {
                log::debug!("node_id: interface enumeration failed: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(not(all(
    feature = "mac",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "illumos"
    )
)))]
mod ifaddrs {
    use super::Interface;

    pub(super) fn interfaces() -> Vec<Interface> {
        Vec::new()
    }
}

/// Represents a generator of UUIDv1 and UUIDv2 that combines a timestamp, a random clock
/// sequence, and a node ID.
///
/// The generator keeps no state between calls, so two UUIDs generated within the same clock tick
/// are told apart only by their random clock sequences (and node IDs, if randomized). The
/// `randomize_node` flag selects the node ID source: the hardware address reported by `N`, or 48
/// random bits with the multicast bit set as per RFC 4122, section 4.5. The clock sequence is
/// random either way.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{v1::TimeGenerator, Version};
///
/// let mut g = TimeGenerator::new(true);
/// let uuid = g.generate_v1()?;
/// assert_eq!(uuid.version(), Some(Version::Mac));
/// # Ok::<(), rfc4122::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct TimeGenerator<R = OsRng, C = SystemClock, N = HardwareNode> {
    rng: R,
    clock: C,
    node: N,
    randomize_node: bool,
}

impl TimeGenerator {
    /// Creates a generator that uses the system clock, the operating system's random number
    /// generator, and the host's hardware address unless `randomize_node` is `true`.
    pub const fn new(randomize_node: bool) -> Self {
        Self::with_sources(OsRng, SystemClock, HardwareNode, randomize_node)
    }
}

impl<R: RngCore + CryptoRng, C: Clock, N: NodeSource> TimeGenerator<R, C, N> {
    /// Creates a generator with the specified random number generator, clock, and hardware
    /// address source.
    pub const fn with_sources(rng: R, clock: C, node: N, randomize_node: bool) -> Self {
        Self {
            rng,
            clock,
            node,
            randomize_node,
        }
    }

    /// Generates a new UUIDv1 object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeIdUnavailable`] if no hardware address is available and the node ID
    /// is not randomized, or [`Error::EntropyUnavailable`] if the random number generator fails.
    pub fn generate_v1(&mut self) -> Result<Uuid, Error> {
        let bytes = self.timestamp_bytes()?;
        Ok(Uuid::from(bytes).stamp(Version::Mac))
    }

    /// Generates a new UUIDv2 object, overwriting the low 32 bits of the timestamp with `id` (a
    /// POSIX UID or GID, typically) and the low byte of the clock sequence with `domain`.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`TimeGenerator::generate_v1`].
    pub fn generate_v2(&mut self, id: u32, domain: u8) -> Result<Uuid, Error> {
        let mut bytes = self.timestamp_bytes()?;
        bytes[..4].copy_from_slice(&id.to_be_bytes());
        bytes[9] = domain;
        Ok(Uuid::from(bytes).stamp(Version::Dce))
    }

    /// Packs the timestamp, clock sequence, and node ID, leaving version and variant unset.
    fn timestamp_bytes(&mut self) -> Result<[u8; 16], Error> {
        let ts = self.clock.gregorian_ticks();
        let mut bytes = [0u8; 16];
        bytes[..4].copy_from_slice(&((ts & 0xffff_ffff) as u32).to_be_bytes());
        bytes[4..6].copy_from_slice(&(((ts >> 32) & 0xffff) as u16).to_be_bytes());
        bytes[6..8].copy_from_slice(&(((ts >> 48) & 0x0fff) as u16).to_be_bytes());
        fill_random(&mut self.rng, &mut bytes[8..10])?;
        bytes[10..].copy_from_slice(&self.node_id()?);
        Ok(bytes)
    }

    fn node_id(&mut self) -> Result<[u8; 6], Error> {
        if !self.randomize_node {
            return self.node.node_id().ok_or(Error::NodeIdUnavailable);
        }

        let mut node = [0u8; 6];
        fill_random(&mut self.rng, &mut node)?;
        node[0] |= 0x01;
        Ok(node)
    }
}

fn fill_random<R: RngCore>(rng: &mut R, dest: &mut [u8]) -> Result<(), Error> {
    rng.try_fill_bytes(dest).map_err(|e| {
        log::debug!("fill_random: random number generator failed: {e}");
        Error::EntropyUnavailable(e)
    })
}

/// Generates a UUIDv1 object with the default sources.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::uuid1(true)?;
/// println!("{uuid}"); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid1(randomize_node: bool) -> Result<Uuid, Error> {
    TimeGenerator::new(randomize_node).generate_v1()
}

/// Generates a UUIDv2 object with the default sources; see [`TimeGenerator::generate_v2`].
pub fn uuid2(id: u32, domain: u8, randomize_node: bool) -> Result<Uuid, Error> {
    TimeGenerator::new(randomize_node).generate_v2(id, domain)
}

impl Uuid {
    /// Generates a UUIDv1 object; see [`uuid1`].
    pub fn new_v1(randomize_node: bool) -> Result<Self, Error> {
        uuid1(randomize_node)
    }

    /// Generates a UUIDv2 object; see [`uuid2`].
    pub fn new_v2(id: u32, domain: u8, randomize_node: bool) -> Result<Self, Error> {
        uuid2(id, domain, randomize_node)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        first_up_hardware_address, gregorian_ticks_at, uuid1, uuid2, Clock, HardwareNode,
        Interface, NodeSource, TimeGenerator, GREGORIAN_OFFSET,
    };
    use crate::{Error, Uuid, Variant, Version};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const N_SAMPLES: usize = 10_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid1(true).unwrap().into()).collect());

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn gregorian_ticks(&mut self) -> u64 {
            self.0
        }
    }

    struct FixedNode(Option<[u8; 6]>);

    impl NodeSource for FixedNode {
        fn node_id(&mut self) -> Option<[u8; 6]> {
            self.0
        }
    }

    struct FailingRng;

    impl rand::RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy exhausted"))
        }
    }

    impl rand::CryptoRng for FailingRng {}

    const NODE: [u8; 6] = [0x00, 0x1b, 0x63, 0x84, 0x45, 0xe6];

    fn fixed_gen(
        ts: u64,
        node: Option<[u8; 6]>,
        randomize_node: bool,
    ) -> TimeGenerator<ChaCha8Rng, FixedClock, FixedNode> {
        TimeGenerator::with_sources(
            ChaCha8Rng::seed_from_u64(ts),
            FixedClock(ts),
            FixedNode(node),
            randomize_node,
        )
    }

    fn decode_timestamp(e: &Uuid) -> u64 {
        let b = e.as_bytes();
        let time_low = u64::from(u32::from_be_bytes([b[0], b[1], b[2], b[3]]));
        let time_mid = u64::from(u16::from_be_bytes([b[4], b[5]]));
        let time_hi = u64::from(u16::from_be_bytes([b[6], b[7]]) & 0x0fff);
        (time_hi << 48) | (time_mid << 32) | time_low
    }

    /// Computes Gregorian offset from Julian day numbers
    #[test]
    fn computes_gregorian_offset_from_julian_day_numbers() {
        assert_eq!(GREGORIAN_OFFSET, 0x01b2_1dd2_1381_4000);
        assert_eq!(GREGORIAN_OFFSET, 122_192_928_000_000_000);
    }

    /// Saturates timestamp of system time before Unix epoch
    #[test]
    fn saturates_timestamp_of_system_time_before_unix_epoch() {
        use std::time::{Duration, UNIX_EPOCH};
        assert_eq!(gregorian_ticks_at(UNIX_EPOCH), GREGORIAN_OFFSET);
        assert_eq!(
            gregorian_ticks_at(UNIX_EPOCH + Duration::from_secs(1)),
            GREGORIAN_OFFSET + 10_000_000
        );

        // 1969-12-31T23:59:59Z
        assert_eq!(
            gregorian_ticks_at(UNIX_EPOCH - Duration::from_secs(1)),
            GREGORIAN_OFFSET - 10_000_000
        );

        // 1582-10-15T00:00:00Z
        let reform = UNIX_EPOCH - Duration::from_nanos(GREGORIAN_OFFSET * 100);
        assert_eq!(gregorian_ticks_at(reform), 0);

        // clamps times before the Gregorian reform to zero
        if let Some(t) = reform.checked_sub(Duration::from_secs(86_400)) {
            assert_eq!(gregorian_ticks_at(t), 0);
        }
    }

    /// Picks first interface that is up with non-zero hardware address
    #[test]
    fn picks_first_interface_that_is_up_with_non_zero_hardware_address() {
        let iface = |name: &str, is_up: bool, hardware_addr: Option<[u8; 6]>| Interface {
            name: name.to_owned(),
            is_up,
            hardware_addr,
        };
        let eth0 = [0x02, 0xfc, 0x00, 0x00, 0x00, 0x01];

        let interfaces = vec![
            iface("ifb0", false, Some([0x12, 0xe1, 0x44, 0x71, 0xee, 0x8a])),
            iface("lo", true, Some([0; 6])),
            iface("eth0", true, None),
            iface("eth0", true, Some(eth0)),
            iface("eth1", true, Some(NODE)),
        ];
        assert_eq!(first_up_hardware_address(interfaces), Some(eth0));

        let interfaces = vec![
            iface("ifb0", false, Some(NODE)),
            iface("lo", true, Some([0; 6])),
            iface("tun0", true, None),
        ];
        assert_eq!(first_up_hardware_address(interfaces), None);
        assert_eq!(first_up_hardware_address(Vec::new()), None);
    }

    /// Takes hardware address from interface that is up
    #[cfg(all(feature = "mac", target_os = "linux"))]
    #[test]
    fn takes_hardware_address_from_interface_that_is_up() {
        use std::fs;

        let Some(node) = HardwareNode.node_id() else {
            return;
        };
        let text = node.map(|b| format!("{b:02x}")).join(":");
        let entries = fs::read_dir("/sys/class/net").unwrap();
        let is_up_with_node = entries.flatten().any(|entry| {
            let path = entry.path();
            let address = fs::read_to_string(path.join("address")).unwrap_or_default();
            let flags = fs::read_to_string(path.join("flags")).unwrap_or_default();
            let flags = u32::from_str_radix(flags.trim().trim_start_matches("0x"), 16).unwrap_or(0);
            address.trim() == text && flags & 0x1 != 0
        });
        assert!(is_up_with_node, "node id {text} taken from an interface that is not up");
    }

    /// Packs timestamp fields and hardware address
    #[test]
    fn packs_timestamp_fields_and_hardware_address() {
        let ts = 0x0123_4567_89ab_cdef;
        let e = fixed_gen(ts, Some(NODE), false).generate_v1().unwrap();
        let text = e.to_string();
        assert!(text.starts_with("89abcdef-4567-1123-"), "{text}");
        assert!(text.ends_with("-001b638445e6"), "{text}");
        assert_eq!(decode_timestamp(&e), ts & 0x0fff_ffff_ffff_ffff);
        assert_eq!(e.version(), Some(Version::Mac));
        assert_eq!(e.variant(), Variant::Rfc4122);
    }

    /// Drops the top four timestamp bits in favor of version
    #[test]
    fn drops_the_top_four_timestamp_bits_in_favor_of_version() {
        let e = fixed_gen(u64::MAX, Some(NODE), false)
            .generate_v1()
            .unwrap();
        assert!(e.to_string().starts_with("ffffffff-ffff-1fff-"));
    }

    /// Fails without hardware address unless node ID is randomized
    #[test]
    fn fails_without_hardware_address_unless_node_id_is_randomized() {
        let ts = GREGORIAN_OFFSET;
        assert!(matches!(
            fixed_gen(ts, None, false).generate_v1(),
            Err(Error::NodeIdUnavailable)
        ));
        assert!(matches!(
            fixed_gen(ts, None, false).generate_v2(1000, 0),
            Err(Error::NodeIdUnavailable)
        ));

        let e = fixed_gen(ts, None, true).generate_v1().unwrap();
        assert_eq!(e.as_bytes()[10] & 0x01, 0x01, "multicast bit");
    }

    /// Ignores hardware address when node ID is randomized
    #[test]
    fn ignores_hardware_address_when_node_id_is_randomized() {
        let mut g = fixed_gen(GREGORIAN_OFFSET, Some(NODE), true);
        let x = g.generate_v1().unwrap();
        let y = g.generate_v1().unwrap();
        assert_ne!(x.as_bytes()[10..], NODE);
        assert_ne!(x.as_bytes()[10..], y.as_bytes()[10..]);
        assert_eq!(x.as_bytes()[..8], y.as_bytes()[..8]);
    }

    /// Draws clock sequence from random number generator
    #[test]
    fn draws_clock_sequence_from_random_number_generator() {
        let mut g = fixed_gen(GREGORIAN_OFFSET, Some(NODE), false);
        let seqs: std::collections::HashSet<_> = (0..64)
            .map(|_| {
                let e = g.generate_v1().unwrap();
                assert_eq!(e.as_bytes()[10..], NODE);
                [e.as_bytes()[8] & 0x3f, e.as_bytes()[9]]
            })
            .collect();
        assert!(seqs.len() > 32);
    }

    /// Overwrites identifier and local domain in UUIDv2
    #[test]
    fn overwrites_identifier_and_local_domain_in_uuidv2() {
        let ts = 0x0123_4567_89ab_cdef;
        let e = fixed_gen(ts, Some(NODE), false)
            .generate_v2(0xdead_beef, 0x2a)
            .unwrap();
        let text = e.to_string();
        assert!(text.starts_with("deadbeef-4567-2123-"), "{text}");
        assert!(text.ends_with("-001b638445e6"), "{text}");
        assert_eq!(e.as_bytes()[9], 0x2a);
        assert_eq!(e.version(), Some(Version::Dce));
        assert_eq!(e.variant(), Variant::Rfc4122);
    }

    /// Reports random number generator failure
    #[test]
    fn reports_random_number_generator_failure() {
        let mut g = TimeGenerator::with_sources(
            FailingRng,
            FixedClock(GREGORIAN_OFFSET),
            FixedNode(Some(NODE)),
            false,
        );
        assert!(matches!(
            g.generate_v1(),
            Err(Error::EntropyUnavailable(_))
        ));
        assert!(matches!(
            g.generate_v2(0, 0),
            Err(Error::EntropyUnavailable(_))
        ));
    }

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });

        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-2[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        for i in 0..1_000u32 {
            let e = uuid2(i.wrapping_mul(0x9e37_79b9), i as u8, true).unwrap();
            assert!(re.is_match(&e.to_string()));
            assert_eq!(e.version(), Some(Version::Dce));
            assert_eq!(e.variant(), Variant::Rfc4122);
        }
    }

    /// Generates 10k identifiers without collision
    #[test]
    fn generates_10k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time;
        for _ in 0..1_000 {
            let ts_now = (time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_nanos()
                / 100) as i64
                + GREGORIAN_OFFSET as i64;
            let timestamp = decode_timestamp(&uuid1(true).unwrap()) as i64;
            assert!((ts_now - timestamp).abs() < 10_000_000);
        }
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], 0, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], n, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");
        assert_eq!(bins[87], n, "multicast bit 87");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (66..87).chain(88..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
        }
    }

    /// Uses hardware address if the host has one
    #[test]
    fn uses_hardware_address_if_the_host_has_one() {
        match HardwareNode.node_id() {
            Some(node) => {
                let e = uuid1(false).unwrap();
                assert_eq!(e.as_bytes()[10..], node);
                let e = Uuid::new_v2(501, 0, false).unwrap();
                assert_eq!(e.as_bytes()[10..], node);
            }
            None => {
                assert!(matches!(uuid1(false), Err(Error::NodeIdUnavailable)));
                assert!(matches!(
                    Uuid::new_v2(501, 0, false),
                    Err(Error::NodeIdUnavailable)
                ));
            }
        }
        assert!(Uuid::new_v1(true).is_ok());
    }
}
