use crate::ports::controller::{
    Controller, ControllerBase, ControllerContext, ControllerError, LoggableController,
};

/// An asset compiled into the binary and served by [`FilesController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedAsset {
    pub name: &'static str,
    pub content_type: &'static str,
    pub body: &'static str,
}

/// Assets served by the built-in files controller, addressed by action name
pub const EMBEDDED_ASSETS: &[EmbeddedAsset] = &[
    EmbeddedAsset {
        name: "behaviours.js",
        content_type: "application/javascript",
        body: "document.addEventListener('submit',function(e){var f=e.target;\
               if(f.dataset.confirm&&!window.confirm(f.dataset.confirm)){e.preventDefault();}});\n",
    },
    EmbeddedAsset {
        name: "validation.js",
        content_type: "application/javascript",
        body: "function validateRequired(f){for(var i=0;i<f.elements.length;i++){\
               var el=f.elements[i];if(el.required&&!el.value){el.focus();return false;}}return true;}\n",
    },
    EmbeddedAsset {
        name: "switchyard.css",
        content_type: "text/css",
        body: ".field-error{color:#b00020}.notice{background:#fff8e1;padding:.5em}\n",
    },
];

/// Built-in controller serving static files embedded in the framework.
///
/// The action name selects the asset; unknown assets answer with status 404.
#[derive(Debug, Default)]
pub struct FilesController {
    base: ControllerBase,
}

impl FilesController {
    pub fn find(name: &str) -> Option<&'static EmbeddedAsset> {
        EMBEDDED_ASSETS.iter().find(|asset| asset.name == name)
    }
}

impl Controller for FilesController {
    fn process(&mut self, context: &mut ControllerContext) -> Result<(), ControllerError> {
        match Self::find(&context.action) {
            Some(asset) => {
                context.response.status = 200;
                context.response.content_type = Some(asset.content_type.to_string());
                context.response.body = asset.body.as_bytes().to_vec();
            }
            None => {
                self.base
                    .logger()
                    .warn(format_args!("Embedded file not found: {}", context.action));
                context.response.status = 404;
                context.response.content_type = None;
                context.response.body.clear();
            }
        }
        Ok(())
    }

    fn as_loggable(&mut self) -> Option<&mut dyn LoggableController> {
        Some(&mut self.base)
    }
}
