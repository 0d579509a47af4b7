pub mod block_device;
pub mod boot_resource;
pub mod device;
pub mod dns_domain;
pub mod fabric;
pub mod filesystem;
pub mod interface;
pub mod link;
pub mod machine;
pub mod partition;
pub mod pool;
pub mod space;
pub mod static_route;
pub mod subnet;
pub mod tag;
pub mod vlan;
pub mod volume_group;
pub mod zone;

pub use block_device::BlockDevice;
pub use boot_resource::BootResource;
pub use device::Device;
pub use dns_domain::Domain;
pub use fabric::Fabric;
pub use filesystem::FileSystem;
pub use interface::Interface;
pub use link::Link;
pub use machine::Machine;
pub use partition::Partition;
pub use pool::Pool;
pub use space::Space;
pub use static_route::StaticRoute;
pub use subnet::Subnet;
pub use tag::Tag;
pub use vlan::Vlan;
pub use volume_group::VolumeGroup;
pub use zone::Zone;
