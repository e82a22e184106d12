mod ingress;
mod mock;
