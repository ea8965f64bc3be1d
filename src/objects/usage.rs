use ash::vk;

use crate::objects::state::TrackedState;

/// Engine level usage state of a gpu resource.
///
/// Transitioning a resource between 2 different usages generally requires a barrier.
#[repr(u32)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ResourceUsage {
    Invalid = 0,
    Undefined = 1,
    Common = 2,
    VertexBuffer = 3,
    IndexBuffer = 4,
    UniformBuffer = 5,
    ShaderRead = 6,
    UnorderedAccess = 7,
    RenderTarget = 8,
    DepthWrite = 9,
    DepthRead = 10,
    CopySource = 11,
    CopyDest = 12,
    Present = 13,
}

impl ResourceUsage {
    /// Returns the image layout an image must be in to be used with this usage.
    ///
    /// Usages that only apply to buffers return [`vk::ImageLayout::GENERAL`].
    pub const fn get_image_layout(&self) -> vk::ImageLayout {
        match self {
            ResourceUsage::Invalid |
            ResourceUsage::Undefined => vk::ImageLayout::UNDEFINED,
            ResourceUsage::Common |
            ResourceUsage::VertexBuffer |
            ResourceUsage::IndexBuffer |
            ResourceUsage::UniformBuffer |
            ResourceUsage::UnorderedAccess => vk::ImageLayout::GENERAL,
            ResourceUsage::ShaderRead => vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
            ResourceUsage::RenderTarget => vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
            ResourceUsage::DepthWrite => vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
            ResourceUsage::DepthRead => vk::ImageLayout::DEPTH_STENCIL_READ_ONLY_OPTIMAL,
            ResourceUsage::CopySource => vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
            ResourceUsage::CopyDest => vk::ImageLayout::TRANSFER_DST_OPTIMAL,
            ResourceUsage::Present => vk::ImageLayout::PRESENT_SRC_KHR,
        }
    }

    /// Returns true if the gpu never writes to a resource while it is in this usage.
    pub const fn is_read_only(&self) -> bool {
        match self {
            ResourceUsage::VertexBuffer |
            ResourceUsage::IndexBuffer |
            ResourceUsage::UniformBuffer |
            ResourceUsage::ShaderRead |
            ResourceUsage::DepthRead |
            ResourceUsage::CopySource |
            ResourceUsage::Present => true,
            _ => false,
        }
    }
}

impl Default for ResourceUsage {
    fn default() -> Self {
        Self::Invalid
    }
}

impl TrackedState for ResourceUsage {
    const INVALID: Self = ResourceUsage::Invalid;

    #[inline]
    fn into_raw(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_raw(raw: u32) -> Self {
        match raw {
            1 => ResourceUsage::Undefined,
            2 => ResourceUsage::Common,
            3 => ResourceUsage::VertexBuffer,
            4 => ResourceUsage::IndexBuffer,
            5 => ResourceUsage::UniformBuffer,
            6 => ResourceUsage::ShaderRead,
            7 => ResourceUsage::UnorderedAccess,
            8 => ResourceUsage::RenderTarget,
            9 => ResourceUsage::DepthWrite,
            10 => ResourceUsage::DepthRead,
            11 => ResourceUsage::CopySource,
            12 => ResourceUsage::CopyDest,
            13 => ResourceUsage::Present,
            _ => ResourceUsage::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_raw_is_invalid() {
        assert_eq!(ResourceUsage::from_raw(0), ResourceUsage::Invalid);
        assert_eq!(ResourceUsage::from_raw(14), ResourceUsage::Invalid);
        assert_eq!(ResourceUsage::from_raw(crate::objects::MAX_RAW_STATE), ResourceUsage::Invalid);
        assert_eq!(ResourceUsage::from_raw(ResourceUsage::Present.into_raw()), ResourceUsage::Present);
    }

    #[test]
    fn test_image_layouts() {
        assert_eq!(ResourceUsage::Invalid.get_image_layout(), vk::ImageLayout::UNDEFINED);
        assert_eq!(ResourceUsage::RenderTarget.get_image_layout(), vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL);
        assert_eq!(ResourceUsage::ShaderRead.get_image_layout(), vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL);
        assert_eq!(ResourceUsage::CopySource.get_image_layout(), vk::ImageLayout::TRANSFER_SRC_OPTIMAL);
        assert_eq!(ResourceUsage::CopyDest.get_image_layout(), vk::ImageLayout::TRANSFER_DST_OPTIMAL);
        assert_eq!(ResourceUsage::VertexBuffer.get_image_layout(), vk::ImageLayout::GENERAL);
    }

    #[test]
    fn test_read_only() {
        assert!(ResourceUsage::ShaderRead.is_read_only());
        assert!(ResourceUsage::CopySource.is_read_only());
        assert!(!ResourceUsage::CopyDest.is_read_only());
        assert!(!ResourceUsage::RenderTarget.is_read_only());
        assert!(!ResourceUsage::Invalid.is_read_only());
    }
}
