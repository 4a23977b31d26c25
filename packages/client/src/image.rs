//! The container image facade: add/delete/list images on the device.

use serde_json::json;

use vyapi_core::{json_type_name, parse_image_table, ContainerImage, Error as CoreError};

use crate::client::{Client, Endpoint};
use crate::error::Error;

/// Container image operations. Obtained from [`Client::container_images`].
pub struct ContainerImageService<'a> {
    pub(crate) client: &'a Client,
}

impl ContainerImageService<'_> {
    /// Pull an image onto the device, e.g. `"alpine:3.17.3"`.
    pub fn add(&self, image: &str) -> Result<(), Error> {
        self.client.request(
            Endpoint::ContainerImage,
            &json!({ "op": "add", "name": image }),
        )?;
        Ok(())
    }

    /// Delete an image from the device.
    pub fn delete(&self, image: &str) -> Result<(), Error> {
        self.client.request(
            Endpoint::ContainerImage,
            &json!({ "op": "delete", "name": image }),
        )?;
        Ok(())
    }

    /// List the images on the device.
    ///
    /// The server returns the raw listing text; see
    /// [`vyapi_core::parse_image_table`] for how it is parsed.
    pub fn show(&self) -> Result<Vec<ContainerImage>, Error> {
        let data = self
            .client
            .request(Endpoint::ContainerImage, &json!({ "op": "show" }))?;
        let text = data.as_str().ok_or_else(|| CoreError::UnexpectedShape {
            found: json_type_name(&data),
        })?;
        parse_image_table(text).map_err(Error::from)
    }
}
